use super::rounded_ring;
use crate::{
    common::{
        geometry::{mirror_horizontal, rounded_rect, Corners, DESIGN_RECT, EYE_RECT, MODULE_SIZE},
        path::Path,
        settings::{keys, SettingDescriptor, SettingValue, SettingsBag, CORNER_RADIUS_FRACTION, IS_FLIPPED},
    },
    generator::{EyeShape, PupilShape, ShapeGenerator},
    pupil,
};

const OUTER_CORNERS: Corners = Corners::TOP_LEFT.union(Corners::TOP_RIGHT).union(Corners::BOTTOM_LEFT);
const INNER_CORNER_PAIR: Corners = Corners::TOP_RIGHT.union(Corners::BOTTOM_LEFT);
const POINTING_OUT_CORNERS: Corners = INNER_CORNER_PAIR.union(Corners::BOTTOM_RIGHT);

// Rounded rect
//------------------------------------------------------------------------------

/// Ring with all four corners rounded by a tunable fraction of the largest radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    corner_radius_fraction: f64,
}

impl RoundedRect {
    pub const DEFAULT_FRACTION: f64 = 0.65;

    pub fn new(corner_radius_fraction: f64) -> Self {
        let mut eye = Self::default();
        eye.set_setting(&corner_radius_fraction.into(), keys::CORNER_RADIUS_FRACTION);
        eye
    }

    fn radius(&self) -> f64 {
        EYE_RECT.width / 2.0 * self.corner_radius_fraction
    }
}

impl Default for RoundedRect {
    fn default() -> Self {
        Self { corner_radius_fraction: Self::DEFAULT_FRACTION }
    }
}

impl ShapeGenerator for RoundedRect {
    fn name(&self) -> &'static str {
        "roundedRect"
    }

    fn title(&self) -> &'static str {
        "Rounded rectangle"
    }

    fn setting_descriptors(&self) -> &'static [SettingDescriptor] {
        &[CORNER_RADIUS_FRACTION]
    }

    fn settings(&self) -> SettingsBag {
        SettingsBag::new().with(keys::CORNER_RADIUS_FRACTION, self.corner_radius_fraction)
    }

    fn set_setting(&mut self, value: &SettingValue, key: &str) -> bool {
        match (key, value.as_fraction()) {
            (keys::CORNER_RADIUS_FRACTION, Some(v)) => {
                self.corner_radius_fraction = v;
                true
            }
            _ => false,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl EyeShape for RoundedRect {
    fn outer_path(&self) -> Path {
        rounded_ring(Corners::all(), self.radius())
    }

    fn background_path(&self) -> Path {
        rounded_rect(DESIGN_RECT, DESIGN_RECT.width / 2.0 * self.corner_radius_fraction, Corners::all())
    }

    fn default_pupil(&self) -> Box<dyn PupilShape> {
        Box::new(pupil::RoundedRect::default())
    }
}

// Fixed corner profiles
//------------------------------------------------------------------------------

macro_rules! corner_profile_eye {
    ($(#[$doc:meta])* $ty:ident, $name:literal, $title:literal, $corners:expr, $radius:expr, $pupil:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        pub struct $ty;

        impl ShapeGenerator for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn title(&self) -> &'static str {
                $title
            }

            fn reset(&mut self) {}
        }

        impl EyeShape for $ty {
            fn outer_path(&self) -> Path {
                rounded_ring($corners, $radius)
            }

            fn default_pupil(&self) -> Box<dyn PupilShape> {
                Box::new($pupil)
            }
        }
    };
}

corner_profile_eye!(
    /// Three outer corners softly rounded, the corner facing the symbol centre kept sharp
    RoundedOuter,
    "roundedOuter",
    "Rounded outer",
    OUTER_CORNERS,
    1.5 * MODULE_SIZE,
    pupil::RoundedOuter
);

corner_profile_eye!(
    RoundedPointingIn,
    "roundedPointingIn",
    "Rounded pointing in",
    OUTER_CORNERS,
    2.5 * MODULE_SIZE,
    pupil::RoundedPointingIn
);

corner_profile_eye!(
    RoundedPointingOut,
    "roundedPointingOut",
    "Rounded pointing out",
    POINTING_OUT_CORNERS,
    2.5 * MODULE_SIZE,
    pupil::RoundedPointingOut
);

corner_profile_eye!(
    /// Fully rounded except for the corner facing the symbol centre
    Teardrop,
    "teardrop",
    "Teardrop",
    OUTER_CORNERS,
    EYE_RECT.width / 2.0,
    pupil::Teardrop
);

// Leaf
//------------------------------------------------------------------------------

/// Ring with two opposite corners rounded into a leaf. Flipping swaps the diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Leaf {
    is_flipped: bool,
}

impl Leaf {
    pub fn new(is_flipped: bool) -> Self {
        Self { is_flipped }
    }
}

impl ShapeGenerator for Leaf {
    fn name(&self) -> &'static str {
        "leaf"
    }

    fn title(&self) -> &'static str {
        "Leaf"
    }

    fn setting_descriptors(&self) -> &'static [SettingDescriptor] {
        &[IS_FLIPPED]
    }

    fn settings(&self) -> SettingsBag {
        SettingsBag::new().with(keys::IS_FLIPPED, self.is_flipped)
    }

    fn set_setting(&mut self, value: &SettingValue, key: &str) -> bool {
        match (key, value.as_bool()) {
            (keys::IS_FLIPPED, Some(v)) => {
                self.is_flipped = v;
                true
            }
            _ => false,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl EyeShape for Leaf {
    fn outer_path(&self) -> Path {
        let path = rounded_ring(INNER_CORNER_PAIR, 3.0 * MODULE_SIZE);
        if self.is_flipped {
            mirror_horizontal(&path)
        } else {
            path
        }
    }

    fn default_pupil(&self) -> Box<dyn PupilShape> {
        Box::new(pupil::Leaf::new(self.is_flipped))
    }
}
