use std::fmt::Write;

use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap};

use crate::{
    common::{
        error::{ShapeError, ShapeResult},
        geometry::{Flip, Transform, DESIGN_RECT, MODULE_SIZE, PUPIL_RECT},
        path::{Path, PathCommand},
    },
    eye,
    generator::{EyeShape, PupilShape, ShapeGenerator},
    pupil,
    registry::ShapeEnvelope,
};

const PAPER: u8 = 255;

// Layer
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Background,
    Eye,
    Pupil,
}

impl LayerKind {
    /// Grey level the layer is painted with
    pub fn level(self) -> u8 {
        match self {
            Self::Background => 224,
            Self::Eye | Self::Pupil => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub path: Path,
}

impl Layer {
    pub fn new(kind: LayerKind, path: Path) -> Self {
        Self { kind, path }
    }

    fn transform(self, transform: &Transform) -> Self {
        Self { kind: self.kind, path: self.path.transform(transform) }
    }
}

// Eye position
//------------------------------------------------------------------------------

/// Corner of the symbol an eye is drawn in. The top-right eye is mirrored horizontally and
/// the bottom-left one vertically, so shapes with a direction all face the symbol centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EyePosition {
    TopLeft,
    TopRight,
    BottomLeft,
}

impl EyePosition {
    pub const ALL: [EyePosition; 3] = [Self::TopLeft, Self::TopRight, Self::BottomLeft];

    pub fn flip(self) -> Flip {
        match self {
            Self::TopLeft => Flip::None,
            Self::TopRight => Flip::Horizontal,
            Self::BottomLeft => Flip::Vertical,
        }
    }

    /// Maps the design square onto a symbol `dimension` modules wide, drawn with
    /// `module_size` units per module. The design square starts one module outside the
    /// finder pattern, so its origin may be negative.
    pub fn placement(self, dimension: usize, module_size: f64) -> Transform {
        debug_assert!(dimension >= 21, "Symbol is narrower than the smallest QR version");

        let scale = module_size / MODULE_SIZE;
        let far = (dimension as f64 - 8.0) * module_size;
        let (x, y) = match self {
            Self::TopLeft => (-module_size, -module_size),
            Self::TopRight => (far, -module_size),
            Self::BottomLeft => (-module_size, far),
        };
        Transform::scale(scale, scale).then(Transform::translate(x, y))
    }
}

// Style
//------------------------------------------------------------------------------

/// An eye paired with a pupil
#[derive(Debug, Clone)]
pub struct Style {
    eye: Box<dyn EyeShape>,
    pupil: Box<dyn PupilShape>,
}

impl Default for Style {
    fn default() -> Self {
        Self::with_default_pupil(Box::new(eye::Square))
    }
}

impl Style {
    pub fn new(eye: Box<dyn EyeShape>, pupil: Box<dyn PupilShape>) -> Self {
        Self { eye, pupil }
    }

    /// Pairs `eye` with the pupil it suggests
    pub fn with_default_pupil(eye: Box<dyn EyeShape>) -> Self {
        let pupil = eye.default_pupil();
        Self { eye, pupil }
    }

    pub fn eye(&self) -> &dyn EyeShape {
        self.eye.as_ref()
    }

    pub fn pupil(&self) -> &dyn PupilShape {
        self.pupil.as_ref()
    }

    pub fn eye_mut(&mut self) -> &mut dyn EyeShape {
        self.eye.as_mut()
    }

    pub fn pupil_mut(&mut self) -> &mut dyn PupilShape {
        self.pupil.as_mut()
    }

    /// Paint order in design units: safe zone, then ring, then glyph
    pub fn layers(&self) -> Vec<Layer> {
        vec![
            Layer::new(LayerKind::Background, self.eye.background_path()),
            Layer::new(LayerKind::Eye, self.eye.outer_path()),
            Layer::new(LayerKind::Pupil, self.pupil.glyph_path()),
        ]
    }

    /// Layers of the eye at `position` in the coordinates of a whole symbol
    pub fn placed_layers(&self, position: EyePosition, dimension: usize, module_size: f64) -> Vec<Layer> {
        let flip = position.flip();
        let placement = position.placement(dimension, module_size);
        self.layers()
            .into_iter()
            .map(|l| Layer::new(l.kind, flip.apply(&l.path)).transform(&placement))
            .collect()
    }

    /// Eye ring scaled to a `size` square
    pub fn eye_preview(&self, size: f64) -> Path {
        self.eye.outer_path().transform(&Transform::preview(size, DESIGN_RECT))
    }

    /// Pupil glyph scaled up so its region fills a `size` square
    pub fn pupil_preview(&self, size: f64) -> Path {
        self.pupil.glyph_path().transform(&Transform::preview(size, PUPIL_RECT))
    }

    fn preview_layers(&self, size: f64) -> Vec<Layer> {
        let transform = Transform::preview(size, DESIGN_RECT);
        self.layers().into_iter().map(|l| l.transform(&transform)).collect()
    }

    /// Grey-level picture of the composed style, `size` pixels square
    pub fn thumbnail(&self, size: u32) -> GrayImage {
        tracing::trace!(eye = self.eye.name(), pupil = self.pupil.name(), size, "Rasterizing thumbnail");
        let mut canvas = GrayImage::from_pixel(size, size, Luma([PAPER]));
        for layer in self.preview_layers(size as f64) {
            let mask = rasterize(&layer.path, size);
            for (x, y, px) in mask.enumerate_pixels() {
                if px.0[0] != 0 {
                    canvas.put_pixel(x, y, Luma([layer.kind.level()]));
                }
            }
        }
        canvas
    }

    /// Standalone SVG document of the composed style, `size` units square
    pub fn to_svg(&self, size: f64) -> String {
        let mut svg = String::new();
        // Writing into a String never fails
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
        );
        for layer in self.preview_layers(size) {
            let v = layer.kind.level();
            let _ = writeln!(
                svg,
                r##"<path d="{}" fill="#{v:02x}{v:02x}{v:02x}" fill-rule="evenodd"/>"##,
                layer.path.to_svg_data()
            );
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub fn to_document(&self) -> StyleDocument {
        StyleDocument { eye: ShapeEnvelope::of(self.eye()), pupil: ShapeEnvelope::of(self.pupil()) }
    }

    pub fn from_document(document: &StyleDocument) -> ShapeResult<Self> {
        Ok(Self::new(eye::create_from_envelope(&document.eye)?, pupil::create_from_envelope(&document.pupil)?))
    }

    pub fn to_json(&self) -> ShapeResult<String> {
        serde_json::to_string(&self.to_document()).map_err(ShapeError::malformed)
    }

    pub fn from_json(json: &str) -> ShapeResult<Self> {
        let document: StyleDocument = serde_json::from_str(json).map_err(ShapeError::malformed)?;
        Self::from_document(&document)
    }
}

/// Persisted pairing: `{ "eye": <envelope>, "pupil": <envelope> }`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleDocument {
    pub eye: ShapeEnvelope,
    pub pupil: ShapeEnvelope,
}

// Rasterization
//------------------------------------------------------------------------------

/// Even-odd coverage mask of `path`, 255 inside and 0 outside
fn rasterize(path: &Path, size: u32) -> GrayImage {
    let mut mask = GrayImage::new(size, size);
    let (Some(mut pixmap), Some(outline)) = (Pixmap::new(size, size), skia_path(path)) else {
        return mask;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(255, 255, 255, 255);
    paint.anti_alias = false;
    pixmap.fill_path(&outline, &paint, FillRule::EvenOdd, tiny_skia::Transform::identity(), None);

    for (px, coverage) in mask.pixels_mut().zip(pixmap.pixels()) {
        px.0[0] = coverage.alpha();
    }
    mask
}

fn skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for cmd in path.commands() {
        match *cmd {
            PathCommand::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathCommand::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathCommand::CubicTo { ctrl1, ctrl2, end } => builder.cubic_to(
                ctrl1.x as f32,
                ctrl1.y as f32,
                ctrl2.x as f32,
                ctrl2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathCommand::Close => builder.close(),
        }
    }
    // None for empty or degenerate paths
    builder.finish()
}
