use crate::{
    common::{
        geometry::{star, DESIGN_RECT, EYE_HOLE_RECT, EYE_RECT},
        path::Path,
    },
    generator::{EyeShape, PupilShape, ShapeGenerator},
    pupil,
};

// Square
//------------------------------------------------------------------------------

/// Classic square finder ring
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Square;

impl ShapeGenerator for Square {
    fn name(&self) -> &'static str {
        "square"
    }

    fn title(&self) -> &'static str {
        "Square"
    }

    fn reset(&mut self) {}
}

impl EyeShape for Square {
    fn outer_path(&self) -> Path {
        Path::rect(EYE_RECT).append(Path::rect(EYE_HOLE_RECT))
    }

    fn default_pupil(&self) -> Box<dyn PupilShape> {
        Box::new(pupil::Square)
    }
}

// Circle
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle;

impl ShapeGenerator for Circle {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn title(&self) -> &'static str {
        "Circle"
    }

    fn reset(&mut self) {}
}

impl EyeShape for Circle {
    fn outer_path(&self) -> Path {
        Path::ellipse(EYE_RECT).append(Path::ellipse(EYE_HOLE_RECT))
    }

    fn background_path(&self) -> Path {
        Path::ellipse(DESIGN_RECT)
    }

    fn default_pupil(&self) -> Box<dyn PupilShape> {
        Box::new(pupil::Circle)
    }
}

// Squircle
//------------------------------------------------------------------------------

const SQUIRCLE_HANDLE: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Squircle;

impl ShapeGenerator for Squircle {
    fn name(&self) -> &'static str {
        "squircle"
    }

    fn title(&self) -> &'static str {
        "Squircle"
    }

    fn reset(&mut self) {}
}

impl EyeShape for Squircle {
    fn outer_path(&self) -> Path {
        Path::superellipse(EYE_RECT, SQUIRCLE_HANDLE)
            .append(Path::superellipse(EYE_HOLE_RECT, SQUIRCLE_HANDLE))
    }

    fn background_path(&self) -> Path {
        Path::superellipse(DESIGN_RECT, SQUIRCLE_HANDLE)
    }

    fn default_pupil(&self) -> Box<dyn PupilShape> {
        Box::new(pupil::Squircle)
    }
}

// Spiky circle
//------------------------------------------------------------------------------

const SPIKES: usize = 24;
const SPIKE_DEPTH: f64 = 4.0;

/// Ring with a serrated outer edge and a smooth circular hole
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpikyCircle;

impl ShapeGenerator for SpikyCircle {
    fn name(&self) -> &'static str {
        "spikyCircle"
    }

    fn title(&self) -> &'static str {
        "Spiky circle"
    }

    fn reset(&mut self) {}
}

impl EyeShape for SpikyCircle {
    fn outer_path(&self) -> Path {
        let center = EYE_RECT.center();
        let outer = EYE_RECT.width / 2.0;
        star(center, outer, outer - SPIKE_DEPTH, SPIKES).append(Path::ellipse(EYE_HOLE_RECT))
    }

    fn background_path(&self) -> Path {
        Path::ellipse(DESIGN_RECT)
    }

    fn default_pupil(&self) -> Box<dyn PupilShape> {
        Box::new(pupil::SpikyCircle)
    }
}
