use crate::{
    common::{
        geometry::{cut_in_rect, Corners, PUPIL_RECT},
        path::Path,
        settings::{keys, SettingDescriptor, SettingValue, SettingsBag, CORNERS},
    },
    generator::{PupilShape, ShapeGenerator},
};

const CUT_RADIUS: f64 = 8.0;

/// Solid square whose selected corners are cut in, the others rounded out
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Shield {
    corners: Corners,
}

impl Shield {
    pub fn new(corners: Corners) -> Self {
        Self { corners }
    }
}

impl ShapeGenerator for Shield {
    fn name(&self) -> &'static str {
        "shield"
    }

    fn title(&self) -> &'static str {
        "Shield"
    }

    fn setting_descriptors(&self) -> &'static [SettingDescriptor] {
        &[CORNERS]
    }

    fn settings(&self) -> SettingsBag {
        SettingsBag::new().with(keys::CORNERS, self.corners)
    }

    fn set_setting(&mut self, value: &SettingValue, key: &str) -> bool {
        match (key, value.as_corners()) {
            (keys::CORNERS, Some(v)) => {
                self.corners = v;
                true
            }
            _ => false,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl PupilShape for Shield {
    fn glyph_path(&self) -> Path {
        cut_in_rect(PUPIL_RECT, CUT_RADIUS, self.corners)
    }
}

#[cfg(test)]
mod shield_pupil_tests {
    use super::*;

    #[test]
    fn test_corner_selection_changes_glyph() {
        let plain = Shield::default().glyph_path();
        let cut = Shield::new(Corners::TOP_LEFT).glyph_path();
        assert_ne!(plain, cut);
        assert_eq!(plain.subpath_count(), 1);
        assert!(cut.bounds().unwrap().approx_eq(&PUPIL_RECT, 1e-6));
    }

    #[test]
    fn test_reset() {
        let mut pupil = Shield::new(Corners::all());
        pupil.reset();
        assert_eq!(pupil, Shield::default());
        assert_eq!(pupil.settings()[keys::CORNERS], SettingValue::Int(0));
    }
}
