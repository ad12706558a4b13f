use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::common::{
    geometry::DESIGN_RECT,
    path::Path,
    settings::{self, SettingDescriptor, SettingValue, SettingsBag, SettingsVisitor},
};

// Shape generator
//------------------------------------------------------------------------------

/// Behaviour shared by eye and pupil generators. A generator's only state is its tunables,
/// which are read and written through string keys so that any generator can be persisted
/// and restored without a shared settings type.
pub trait ShapeGenerator: Send + Sync {
    /// Stable identifier, used as the persistence key
    fn name(&self) -> &'static str;

    /// Display name
    fn title(&self) -> &'static str;

    fn setting_descriptors(&self) -> &'static [SettingDescriptor] {
        &[]
    }

    /// Current value of every tunable
    fn settings(&self) -> SettingsBag {
        SettingsBag::new()
    }

    fn supports_setting(&self, key: &str) -> bool {
        self.setting_descriptors().iter().any(|s| s.key == key)
    }

    /// Applies `value` to the tunable `key`. Returns true when the key is supported and the
    /// value was understood and stored, clamping included. The generator is left untouched
    /// otherwise.
    fn set_setting(&mut self, value: &SettingValue, key: &str) -> bool {
        let _ = (value, key);
        false
    }

    /// Restores every tunable to its default
    fn reset(&mut self);

    /// Best-effort application of a whole bag. Unknown keys and unusable values are skipped;
    /// the keys that were not applied are returned.
    fn apply_settings(&mut self, settings: &SettingsBag) -> Vec<String> {
        let mut rejected = Vec::new();
        for (key, value) in settings {
            if !self.supports_setting(key) {
                tracing::trace!(generator = self.name(), %key, "Ignoring unknown setting");
                rejected.push(key.clone());
            } else if !self.set_setting(value, key) {
                tracing::debug!(generator = self.name(), %key, ?value, "Ignoring malformed setting");
                rejected.push(key.clone());
            }
        }
        rejected
    }

    /// Enumerates the tunables with their current typed values
    fn visit_settings(&self, visitor: &mut dyn SettingsVisitor) {
        settings::visit(self.setting_descriptors(), &self.settings(), visitor);
    }
}

/// Default instance of `T` configured from `settings`
pub(crate) fn configured<T: ShapeGenerator + Default>(settings: Option<&SettingsBag>) -> T {
    let mut generator = T::default();
    if let Some(settings) = settings {
        generator.apply_settings(settings);
    }
    generator
}

// Eye
//------------------------------------------------------------------------------

/// Generator of a finder pattern's outer ring
pub trait EyeShape: ShapeGenerator + CopyEyeShape {
    /// Ring outline in the 90x90 design square
    fn outer_path(&self) -> Path;

    /// Safe zone drawn behind the eye
    fn background_path(&self) -> Path {
        Path::rect(DESIGN_RECT)
    }

    /// Pupil that suits this eye when none is chosen explicitly
    fn default_pupil(&self) -> Box<dyn PupilShape>;
}

pub trait CopyEyeShape {
    /// Independent copy sharing no state with `self`
    fn copy_shape(&self) -> Box<dyn EyeShape>;
}

impl<T: EyeShape + Clone + 'static> CopyEyeShape for T {
    fn copy_shape(&self) -> Box<dyn EyeShape> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn EyeShape> {
    fn clone(&self) -> Self {
        self.copy_shape()
    }
}

impl Debug for dyn EyeShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("EyeShape")
            .field("name", &self.name())
            .field("settings", &self.settings())
            .finish()
    }
}

// Pupil
//------------------------------------------------------------------------------

/// Generator of the glyph drawn inside an eye
pub trait PupilShape: ShapeGenerator + CopyPupilShape {
    /// Glyph outline, confined to the 30x30 pupil region of the design square
    fn glyph_path(&self) -> Path;
}

pub trait CopyPupilShape {
    /// Independent copy sharing no state with `self`
    fn copy_shape(&self) -> Box<dyn PupilShape>;
}

impl<T: PupilShape + Clone + 'static> CopyPupilShape for T {
    fn copy_shape(&self) -> Box<dyn PupilShape> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn PupilShape> {
    fn clone(&self) -> Self {
        self.copy_shape()
    }
}

impl Debug for dyn PupilShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PupilShape")
            .field("name", &self.name())
            .field("settings", &self.settings())
            .finish()
    }
}
