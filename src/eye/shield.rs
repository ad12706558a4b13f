use crate::{
    common::{
        geometry::{shield, Corners},
        path::Path,
        settings::{keys, SettingDescriptor, SettingValue, SettingsBag, CORNERS},
    },
    generator::{EyeShape, PupilShape, ShapeGenerator},
    pupil,
};

/// Ring assembled from four quadrant templates. Selected corners are scooped inwards,
/// the others rounded outwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Shield {
    corners: Corners,
}

impl Shield {
    pub fn new(corners: Corners) -> Self {
        Self { corners }
    }

    pub fn corners(&self) -> Corners {
        self.corners
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

impl EyeShape for Shield {
    fn outer_path(&self) -> Path {
        shield::ring(self.corners)
    }

    fn default_pupil(&self) -> Box<dyn PupilShape> {
        Box::new(pupil::Shield::default())
    }
}

#[cfg(test)]
mod shield_eye_tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_top_left_selected() {
        let eye = Shield::new(Corners::TOP_LEFT);
        let exp = Path::concat([shield::tl_in(), shield::tr_out(), shield::bl_out(), shield::br_out()]);
        assert_eq!(eye.outer_path(), exp);
    }

    #[test]
    fn test_all_selected() {
        let eye = Shield::new(Corners::all());
        let exp = Path::concat([shield::tl_in(), shield::tr_in(), shield::bl_in(), shield::br_in()]);
        assert_eq!(eye.outer_path(), exp);
    }

    #[test_case(SettingValue::Int(6), true, Corners::TOP_RIGHT | Corners::BOTTOM_LEFT)]
    #[test_case(SettingValue::Float(8.0), true, Corners::BOTTOM_RIGHT)]
    #[test_case(SettingValue::Int(16), false, Corners::TOP_LEFT)]
    #[test_case(SettingValue::Int(-1), false, Corners::TOP_LEFT)]
    #[test_case(SettingValue::Bool(true), false, Corners::TOP_LEFT)]
    fn test_set_corners(value: SettingValue, accepted: bool, exp: Corners) {
        let mut eye = Shield::new(Corners::TOP_LEFT);
        assert_eq!(eye.set_setting(&value, keys::CORNERS), accepted);
        assert_eq!(eye.corners(), exp);
    }

    #[test]
    fn test_settings_round_trip() {
        let eye = Shield::new(Corners::TOP_LEFT | Corners::BOTTOM_RIGHT);
        assert_eq!(eye.settings()[keys::CORNERS], SettingValue::Int(9));
        let mut copy = Shield::default();
        assert!(copy.apply_settings(&eye.settings()).is_empty());
        assert_eq!(copy, eye);
    }
}
