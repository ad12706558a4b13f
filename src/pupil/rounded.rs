use crate::{
    common::{
        geometry::{mirror_horizontal, rounded_rect, Corners, PUPIL_RECT},
        path::Path,
        settings::{keys, SettingDescriptor, SettingValue, SettingsBag, CORNER_RADIUS_FRACTION, IS_FLIPPED},
    },
    generator::{PupilShape, ShapeGenerator},
};

const OUTER_CORNERS: Corners = Corners::TOP_LEFT.union(Corners::TOP_RIGHT).union(Corners::BOTTOM_LEFT);
const INNER_CORNER_PAIR: Corners = Corners::TOP_RIGHT.union(Corners::BOTTOM_LEFT);
const POINTING_OUT_CORNERS: Corners = INNER_CORNER_PAIR.union(Corners::BOTTOM_RIGHT);

// Keeps a fully rounded glyph from collapsing into a circle
const ROUNDING_LIMIT: f64 = 0.9;

// Rounded rect
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    corner_radius_fraction: f64,
}

impl RoundedRect {
    pub const DEFAULT_FRACTION: f64 = 0.3;

    pub fn new(corner_radius_fraction: f64) -> Self {
        let mut pupil = Self::default();
        pupil.set_setting(&corner_radius_fraction.into(), keys::CORNER_RADIUS_FRACTION);
        pupil
    }

    /// Radius of every corner in design units
    pub fn corner_radius(&self) -> f64 {
        PUPIL_RECT.width / 2.0 * self.corner_radius_fraction * ROUNDING_LIMIT
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

impl PupilShape for RoundedRect {
    fn glyph_path(&self) -> Path {
        rounded_rect(PUPIL_RECT, self.corner_radius(), Corners::all())
    }
}

// Fixed corner profiles
//------------------------------------------------------------------------------

macro_rules! corner_profile_pupil {
    ($ty:ident, $name:literal, $title:literal, $corners:expr, $radius:expr) => {
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

        impl PupilShape for $ty {
            fn glyph_path(&self) -> Path {
                rounded_rect(PUPIL_RECT, $radius, $corners)
            }
        }
    };
}

corner_profile_pupil!(RoundedOuter, "roundedOuter", "Rounded outer", OUTER_CORNERS, 6.0);
corner_profile_pupil!(RoundedPointingIn, "roundedPointingIn", "Rounded pointing in", OUTER_CORNERS, 12.0);
corner_profile_pupil!(
    RoundedPointingOut,
    "roundedPointingOut",
    "Rounded pointing out",
    POINTING_OUT_CORNERS,
    12.0
);
corner_profile_pupil!(Teardrop, "teardrop", "Teardrop", OUTER_CORNERS, PUPIL_RECT.width / 2.0);

// Leaf
//------------------------------------------------------------------------------

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

impl PupilShape for Leaf {
    fn glyph_path(&self) -> Path {
        let path = rounded_rect(PUPIL_RECT, 12.0, INNER_CORNER_PAIR);
        if self.is_flipped {
            mirror_horizontal(&path)
        } else {
            path
        }
    }
}

#[cfg(test)]
mod rounded_pupil_tests {
    use test_case::test_case;

    use super::*;
    use crate::common::path::{PathCommand, Point};

    #[test]
    fn test_rounded_rect_default_radius() {
        let pupil = RoundedRect::default();
        assert!((pupil.corner_radius() - 4.05).abs() < 1e-12);
        let exp = rounded_rect(PUPIL_RECT, 4.05, Corners::all());
        assert!(pupil.glyph_path().approx_eq(&exp, 1e-9));
    }

    #[test_case(-1.0, 0.0)]
    #[test_case(2.0, 13.5)]
    #[test_case(f64::NAN, 4.05)]
    fn test_rounded_rect_clamping(input: f64, radius: f64) {
        let mut pupil = RoundedRect::default();
        pupil.set_setting(&SettingValue::Float(input), keys::CORNER_RADIUS_FRACTION);
        assert!((pupil.corner_radius() - radius).abs() < 1e-12);
    }

    #[test]
    fn test_profiles_fill_pupil_rect() {
        let pupils: [&dyn PupilShape; 5] =
            [&RoundedOuter, &RoundedPointingIn, &RoundedPointingOut, &Teardrop, &Leaf::new(true)];
        for pupil in pupils {
            let bounds = pupil.glyph_path().bounds().unwrap();
            assert!(bounds.approx_eq(&PUPIL_RECT, 1e-6), "{}", pupil.name());
        }
    }

    #[test]
    fn test_leaf_flip_moves_sharp_corner() {
        let corner = PathCommand::LineTo(Point::new(30.0, 30.0));
        assert!(Leaf::default().glyph_path().commands().contains(&corner));
        assert!(!Leaf::new(true).glyph_path().commands().contains(&corner));
    }
}
