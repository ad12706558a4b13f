use crate::{
    common::{
        geometry::{rippled_circle, star, MODULE_SIZE, PUPIL_RECT},
        path::{Path, Point},
    },
    generator::{PupilShape, ShapeGenerator},
};

macro_rules! fixed_pupil {
    ($(#[$doc:meta])* $ty:ident, $name:literal, $title:literal, $glyph:expr) => {
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

        impl PupilShape for $ty {
            fn glyph_path(&self) -> Path {
                $glyph
            }
        }
    };
}

fixed_pupil!(Square, "square", "Square", Path::rect(PUPIL_RECT));

fixed_pupil!(Circle, "circle", "Circle", Path::ellipse(PUPIL_RECT));

fixed_pupil!(Squircle, "squircle", "Squircle", Path::superellipse(PUPIL_RECT, 0.9));

fixed_pupil!(
    /// Plus sign with one module wide arms
    Cross,
    "cross",
    "Cross",
    cross()
);

fixed_pupil!(
    /// Circle with a rippled rim, like a wax seal
    Seal,
    "seal",
    "Seal",
    rippled_circle(PUPIL_RECT.center(), PUPIL_RECT.width / 2.0, 2.0, 12)
);

fixed_pupil!(
    SpikyCircle,
    "spikyCircle",
    "Spiky circle",
    star(PUPIL_RECT.center(), PUPIL_RECT.width / 2.0, PUPIL_RECT.width / 2.0 - 2.0, 16)
);

fn cross() -> Path {
    let (lo, hi) = (PUPIL_RECT.x, PUPIL_RECT.max_x());
    let (a, b) = (lo + MODULE_SIZE, hi - MODULE_SIZE);
    Path::polygon(
        [
            (a, lo),
            (b, lo),
            (b, a),
            (hi, a),
            (hi, b),
            (b, b),
            (b, hi),
            (a, hi),
            (a, b),
            (lo, b),
            (lo, a),
            (a, a),
        ]
        .map(|(x, y)| Point::new(x, y)),
    )
}

#[cfg(test)]
mod simple_pupil_tests {
    use test_case::test_case;

    use super::*;
    use crate::common::settings::SettingValue;

    #[test_case(&Square)]
    #[test_case(&Circle)]
    #[test_case(&Squircle)]
    #[test_case(&Cross)]
    #[test_case(&SpikyCircle)]
    fn test_fills_pupil_rect(pupil: &dyn PupilShape) {
        let bounds = pupil.glyph_path().bounds().unwrap();
        assert!(bounds.approx_eq(&PUPIL_RECT, 1e-6), "{}", pupil.name());
    }

    #[test]
    fn test_cross_outline() {
        let path = Cross.glyph_path();
        assert_eq!(path.subpath_count(), 1);
        assert_eq!(path.len(), 13);
    }

    #[test]
    fn test_seal_ripples_inwards() {
        let bounds = Seal.glyph_path().bounds().unwrap();
        assert!(PUPIL_RECT.contains_rect(&bounds, 1e-9));
        assert!(bounds.width > PUPIL_RECT.width - 4.0);
    }

    #[test]
    fn test_no_settings() {
        let mut pupil = Seal;
        assert!(pupil.settings().is_empty());
        assert!(!pupil.supports_setting("cornerRadiusFraction"));
        assert!(!pupil.set_setting(&SettingValue::Float(0.5), "cornerRadiusFraction"));
    }
}
