use super::{rounded_ring, rounded_ring_with_radii};
use crate::{
    common::{
        geometry::{rounded_rect, rounded_rect_with_radii, Corners, Flip, DESIGN_RECT, MODULE_SIZE},
        path::Path,
        settings::{keys, SettingDescriptor, SettingValue, SettingsBag, FLIP},
    },
    generator::{EyeShape, PupilShape, ShapeGenerator},
    pupil,
};

const HEADLIGHT_CORNERS: Corners = Corners::TOP_LEFT.union(Corners::BOTTOM_LEFT);
const HEADLIGHT_RADIUS: f64 = 3.5 * MODULE_SIZE;

// Outer radii in top-left, top-right, bottom-left, bottom-right order
const UFO_RADII: [f64; 4] = [3.5 * MODULE_SIZE, 3.5 * MODULE_SIZE, MODULE_SIZE, MODULE_SIZE];

fn set_flip(flip: &mut Flip, value: &SettingValue, key: &str) -> bool {
    match (key, value.as_flip()) {
        (keys::FLIP, Some(v)) => {
            *flip = v;
            true
        }
        _ => false,
    }
}

// Headlight
//------------------------------------------------------------------------------

/// Ring bulging towards one side, like a lamp housing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Headlight {
    flip: Flip,
}

impl Headlight {
    pub fn new(flip: Flip) -> Self {
        Self { flip }
    }
}

impl ShapeGenerator for Headlight {
    fn name(&self) -> &'static str {
        "headlight"
    }

    fn title(&self) -> &'static str {
        "Headlight"
    }

    fn setting_descriptors(&self) -> &'static [SettingDescriptor] {
        &[FLIP]
    }

    fn settings(&self) -> SettingsBag {
        SettingsBag::new().with(keys::FLIP, self.flip)
    }

    fn set_setting(&mut self, value: &SettingValue, key: &str) -> bool {
        set_flip(&mut self.flip, value, key)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl EyeShape for Headlight {
    fn outer_path(&self) -> Path {
        self.flip.apply(&rounded_ring(HEADLIGHT_CORNERS, HEADLIGHT_RADIUS))
    }

    fn background_path(&self) -> Path {
        self.flip.apply(&rounded_rect(DESIGN_RECT, HEADLIGHT_RADIUS + MODULE_SIZE, HEADLIGHT_CORNERS))
    }

    fn default_pupil(&self) -> Box<dyn PupilShape> {
        Box::new(pupil::Circle)
    }
}

// Ufo
//------------------------------------------------------------------------------

/// Ring with a domed top and a flattened base
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ufo {
    flip: Flip,
}

impl Ufo {
    pub fn new(flip: Flip) -> Self {
        Self { flip }
    }
}

impl ShapeGenerator for Ufo {
    fn name(&self) -> &'static str {
        "ufo"
    }

    fn title(&self) -> &'static str {
        "UFO"
    }

    fn setting_descriptors(&self) -> &'static [SettingDescriptor] {
        &[FLIP]
    }

    fn settings(&self) -> SettingsBag {
        SettingsBag::new().with(keys::FLIP, self.flip)
    }

    fn set_setting(&mut self, value: &SettingValue, key: &str) -> bool {
        set_flip(&mut self.flip, value, key)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl EyeShape for Ufo {
    fn outer_path(&self) -> Path {
        self.flip.apply(&rounded_ring_with_radii(UFO_RADII))
    }

    fn background_path(&self) -> Path {
        let radii = UFO_RADII.map(|r| r + MODULE_SIZE);
        self.flip.apply(&rounded_rect_with_radii(DESIGN_RECT, radii))
    }

    fn default_pupil(&self) -> Box<dyn PupilShape> {
        Box::new(pupil::RoundedRect::default())
    }
}
