use crate::{
    common::{
        geometry::{module_rect, rounded_module, rounded_rect, Corners, MODULE_SIZE, PUPIL_RECT},
        path::{Path, Point, Rect},
        settings::{keys, SettingDescriptor, SettingValue, SettingsBag, CORNER_RADIUS_FRACTION},
    },
    generator::{PupilShape, ShapeGenerator},
};

const GRID: usize = 3;

// Pixels
//------------------------------------------------------------------------------

/// The 3x3 modules of the pupil drawn individually
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixels {
    corner_radius_fraction: f64,
}

impl Pixels {
    pub const DEFAULT_FRACTION: f64 = 0.0;

    pub fn new(corner_radius_fraction: f64) -> Self {
        let mut pupil = Self::default();
        pupil.set_setting(&corner_radius_fraction.into(), keys::CORNER_RADIUS_FRACTION);
        pupil
    }
}

impl Default for Pixels {
    fn default() -> Self {
        Self { corner_radius_fraction: Self::DEFAULT_FRACTION }
    }
}

impl ShapeGenerator for Pixels {
    fn name(&self) -> &'static str {
        "pixels"
    }

    fn title(&self) -> &'static str {
        "Pixels"
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

impl PupilShape for Pixels {
    fn glyph_path(&self) -> Path {
        let origin = Point::new(PUPIL_RECT.x, PUPIL_RECT.y);
        (0..GRID)
            .flat_map(|row| (0..GRID).map(move |col| (col, row)))
            .map(|(col, row)| {
                rounded_module(module_rect(origin, col, row), Corners::all(), self.corner_radius_fraction)
            })
            .collect()
    }
}

// Bars
//------------------------------------------------------------------------------

fn bars(horizontal: bool) -> Path {
    (0..GRID)
        .map(|i| {
            let offset = i as f64 * MODULE_SIZE;
            let rect = if horizontal {
                Rect::new(PUPIL_RECT.x, PUPIL_RECT.y + offset, PUPIL_RECT.width, MODULE_SIZE)
            } else {
                Rect::new(PUPIL_RECT.x + offset, PUPIL_RECT.y, MODULE_SIZE, PUPIL_RECT.height)
            };
            rounded_rect(rect, MODULE_SIZE / 2.0, Corners::all())
        })
        .collect()
}

/// Three stacked capsules
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarsHorizontal;

impl ShapeGenerator for BarsHorizontal {
    fn name(&self) -> &'static str {
        "barsHorizontal"
    }

    fn title(&self) -> &'static str {
        "Bars horizontal"
    }

    fn reset(&mut self) {}
}

impl PupilShape for BarsHorizontal {
    fn glyph_path(&self) -> Path {
        bars(true)
    }
}

/// Three side by side capsules
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarsVertical;

impl ShapeGenerator for BarsVertical {
    fn name(&self) -> &'static str {
        "barsVertical"
    }

    fn title(&self) -> &'static str {
        "Bars vertical"
    }

    fn reset(&mut self) {}
}

impl PupilShape for BarsVertical {
    fn glyph_path(&self) -> Path {
        bars(false)
    }
}

#[cfg(test)]
mod modular_pupil_tests {
    use super::*;
    use crate::common::geometry::mirror_both;

    #[test]
    fn test_pixels() {
        let path = Pixels::default().glyph_path();
        assert_eq!(path.subpath_count(), 9);
        assert_eq!(path.bounds(), Some(PUPIL_RECT));
        assert_ne!(Pixels::new(0.5).glyph_path(), path);
    }

    #[test]
    fn test_bars() {
        for path in [BarsHorizontal.glyph_path(), BarsVertical.glyph_path()] {
            assert_eq!(path.subpath_count(), 3);
            assert!(path.bounds().unwrap().approx_eq(&PUPIL_RECT, 1e-6));
        }
    }

    #[test]
    fn test_bars_symmetric() {
        let path = BarsVertical.glyph_path();
        let mirrored = mirror_both(&path);
        assert!(mirrored.bounds().unwrap().approx_eq(&path.bounds().unwrap(), 1e-9));
    }
}
