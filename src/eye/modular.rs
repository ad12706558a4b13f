use crate::{
    common::{
        geometry::{module_rect, ring_modules, rounded_module, rounded_rect, Corners, EYE_RECT},
        path::{Path, Point, Rect},
        settings::{
            keys, EyeInnerStyle, SettingDescriptor, SettingValue, SettingsBag, CORNER_RADIUS_FRACTION,
            EYE_INNER_STYLE,
        },
    },
    generator::{EyeShape, PupilShape, ShapeGenerator},
    pupil,
};

const LAST: usize = 6;

fn origin() -> Point {
    Point::new(EYE_RECT.x, EYE_RECT.y)
}

/// Rect spanning modules `from` to `to` inclusive, both given as (col, row)
fn span(from: (usize, usize), to: (usize, usize)) -> Rect {
    let a = module_rect(origin(), from.0, from.1);
    let b = module_rect(origin(), to.0, to.1);
    Rect::new(a.x, a.y, b.max_x() - a.x, b.max_y() - a.y)
}

/// Rect with fully rounded short ends
fn capsule(rect: Rect) -> Path {
    rounded_rect(rect, rect.width.min(rect.height) / 2.0, Corners::all())
}

fn dot(col: usize, row: usize) -> Path {
    Path::ellipse(module_rect(origin(), col, row))
}

/// Outer corner of the ring that the module at (col, row) sits on, if any
fn ring_corner(col: usize, row: usize) -> Option<Corners> {
    match (col, row) {
        (0, 0) => Some(Corners::TOP_LEFT),
        (LAST, 0) => Some(Corners::TOP_RIGHT),
        (0, LAST) => Some(Corners::BOTTOM_LEFT),
        (LAST, LAST) => Some(Corners::BOTTOM_RIGHT),
        _ => None,
    }
}

// Shared fraction setting
//------------------------------------------------------------------------------

macro_rules! fraction_setting {
    ($ty:ident, $default:expr) => {
        impl $ty {
            pub const DEFAULT_FRACTION: f64 = $default;

            pub fn new(corner_radius_fraction: f64) -> Self {
                let mut eye = Self::default();
                eye.set_setting(&corner_radius_fraction.into(), keys::CORNER_RADIUS_FRACTION);
                eye
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self { corner_radius_fraction: Self::DEFAULT_FRACTION }
            }
        }
    };
}

fn fraction_settings(fraction: f64) -> SettingsBag {
    SettingsBag::new().with(keys::CORNER_RADIUS_FRACTION, fraction)
}

fn set_fraction(fraction: &mut f64, value: &SettingValue, key: &str) -> bool {
    match (key, value.as_fraction()) {
        (keys::CORNER_RADIUS_FRACTION, Some(v)) => {
            *fraction = v;
            true
        }
        _ => false,
    }
}

// Pixels
//------------------------------------------------------------------------------

/// Ring drawn as its 24 individual modules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixels {
    corner_radius_fraction: f64,
}

fraction_setting!(Pixels, 0.0);

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
        fraction_settings(self.corner_radius_fraction)
    }

    fn set_setting(&mut self, value: &SettingValue, key: &str) -> bool {
        set_fraction(&mut self.corner_radius_fraction, value, key)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl EyeShape for Pixels {
    fn outer_path(&self) -> Path {
        ring_modules()
            .map(|(col, row)| {
                rounded_module(module_rect(origin(), col, row), Corners::all(), self.corner_radius_fraction)
            })
            .collect()
    }

    fn default_pupil(&self) -> Box<dyn PupilShape> {
        Box::new(pupil::Pixels::default())
    }
}

// Cornered pixels
//------------------------------------------------------------------------------

/// Individual modules with only the four outermost corners of the ring rounded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorneredPixels {
    corner_radius_fraction: f64,
}

fraction_setting!(CorneredPixels, 0.6);

impl ShapeGenerator for CorneredPixels {
    fn name(&self) -> &'static str {
        "corneredPixels"
    }

    fn title(&self) -> &'static str {
        "Cornered pixels"
    }

    fn setting_descriptors(&self) -> &'static [SettingDescriptor] {
        &[CORNER_RADIUS_FRACTION]
    }

    fn settings(&self) -> SettingsBag {
        fraction_settings(self.corner_radius_fraction)
    }

    fn set_setting(&mut self, value: &SettingValue, key: &str) -> bool {
        set_fraction(&mut self.corner_radius_fraction, value, key)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl EyeShape for CorneredPixels {
    fn outer_path(&self) -> Path {
        ring_modules()
            .map(|(col, row)| {
                let corners = ring_corner(col, row).unwrap_or_default();
                rounded_module(module_rect(origin(), col, row), corners, self.corner_radius_fraction)
            })
            .collect()
    }

    fn default_pupil(&self) -> Box<dyn PupilShape> {
        Box::new(pupil::Pixels::default())
    }
}

// Bars
//------------------------------------------------------------------------------

/// Two full-length capsules along one axis, the modules between them drawn as dots
fn bars(horizontal: bool) -> Path {
    let mut path = Path::new();
    for line in [0, LAST] {
        let rect = if horizontal { span((0, line), (LAST, line)) } else { span((line, 0), (line, LAST)) };
        path = path.append(capsule(rect));
    }
    for i in 1..LAST {
        for line in [0, LAST] {
            path = path.append(if horizontal { dot(line, i) } else { dot(i, line) });
        }
    }
    path
}

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

impl EyeShape for BarsHorizontal {
    fn outer_path(&self) -> Path {
        bars(true)
    }

    fn default_pupil(&self) -> Box<dyn PupilShape> {
        Box::new(pupil::BarsHorizontal)
    }
}

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

impl EyeShape for BarsVertical {
    fn outer_path(&self) -> Path {
        bars(false)
    }

    fn default_pupil(&self) -> Box<dyn PupilShape> {
        Box::new(pupil::BarsVertical)
    }
}

// Edges
//------------------------------------------------------------------------------

/// Four side capsules between separately drawn corner modules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edges {
    corner_radius_fraction: f64,
}

fraction_setting!(Edges, 0.5);

impl ShapeGenerator for Edges {
    fn name(&self) -> &'static str {
        "edges"
    }

    fn title(&self) -> &'static str {
        "Edges"
    }

    fn setting_descriptors(&self) -> &'static [SettingDescriptor] {
        &[CORNER_RADIUS_FRACTION]
    }

    fn settings(&self) -> SettingsBag {
        fraction_settings(self.corner_radius_fraction)
    }

    fn set_setting(&mut self, value: &SettingValue, key: &str) -> bool {
        set_fraction(&mut self.corner_radius_fraction, value, key)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl EyeShape for Edges {
    fn outer_path(&self) -> Path {
        let sides = [
            span((1, 0), (LAST - 1, 0)),
            span((LAST, 1), (LAST, LAST - 1)),
            span((1, LAST), (LAST - 1, LAST)),
            span((0, 1), (0, LAST - 1)),
        ];
        let corners = [(0, 0), (LAST, 0), (0, LAST), (LAST, LAST)].map(|(col, row)| {
            rounded_module(module_rect(origin(), col, row), Corners::all(), self.corner_radius_fraction)
        });
        sides.into_iter().map(capsule).chain(corners).collect()
    }

    fn default_pupil(&self) -> Box<dyn PupilShape> {
        Box::new(pupil::Square)
    }
}

// Dot drag
//------------------------------------------------------------------------------

/// Top and bottom capsules joined by side columns that are either dotted or solid
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DotDragHorizontal {
    eye_inner_style: EyeInnerStyle,
}

impl DotDragHorizontal {
    pub fn new(eye_inner_style: EyeInnerStyle) -> Self {
        Self { eye_inner_style }
    }

    fn column(col: usize, dotted: bool) -> Path {
        if dotted {
            (1..LAST).map(|row| dot(col, row)).collect()
        } else {
            capsule(span((col, 1), (col, LAST - 1)))
        }
    }
}

impl ShapeGenerator for DotDragHorizontal {
    fn name(&self) -> &'static str {
        "dotDragHorizontal"
    }

    fn title(&self) -> &'static str {
        "Dot drag horizontal"
    }

    fn setting_descriptors(&self) -> &'static [SettingDescriptor] {
        &[EYE_INNER_STYLE]
    }

    fn settings(&self) -> SettingsBag {
        SettingsBag::new().with(keys::EYE_INNER_STYLE, self.eye_inner_style)
    }

    fn set_setting(&mut self, value: &SettingValue, key: &str) -> bool {
        match (key, value.as_eye_inner_style()) {
            (keys::EYE_INNER_STYLE, Some(v)) => {
                self.eye_inner_style = v;
                true
            }
            _ => false,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl EyeShape for DotDragHorizontal {
    fn outer_path(&self) -> Path {
        Path::concat([
            capsule(span((0, 0), (LAST, 0))),
            capsule(span((0, LAST), (LAST, LAST))),
            Self::column(0, self.eye_inner_style.left()),
            Self::column(LAST, self.eye_inner_style.right()),
        ])
    }

    fn default_pupil(&self) -> Box<dyn PupilShape> {
        Box::new(pupil::Circle)
    }
}

#[cfg(test)]
mod modular_eye_tests {
    use test_case::test_case;

    use super::*;
    use crate::common::path::PathCommand;

    fn curves(path: &Path) -> usize {
        path.commands().iter().filter(|c| matches!(c, PathCommand::CubicTo { .. })).count()
    }

    #[test]
    fn test_pixels_default_sharp() {
        let path = Pixels::default().outer_path();
        assert_eq!(path.subpath_count(), 24);
        assert_eq!(curves(&path), 0);
        assert_eq!(path.bounds(), Some(EYE_RECT));
    }

    #[test]
    fn test_pixels_rounded() {
        let path = Pixels::new(1.0).outer_path();
        assert_eq!(curves(&path), 24 * 4);
        assert!(path.bounds().unwrap().approx_eq(&EYE_RECT, 1e-6));
    }

    #[test]
    fn test_cornered_pixels_rounds_four_corners() {
        let path = CorneredPixels::default().outer_path();
        assert_eq!(path.subpath_count(), 24);
        assert_eq!(curves(&path), 4);
        assert_eq!(CorneredPixels::default().default_pupil().name(), "pixels");
    }

    #[test_case(&BarsHorizontal)]
    #[test_case(&BarsVertical)]
    fn test_bars(eye: &dyn EyeShape) {
        let path = eye.outer_path();
        assert_eq!(path.subpath_count(), 2 + 2 * 5);
        assert!(path.bounds().unwrap().approx_eq(&EYE_RECT, 1e-6));
    }

    #[test]
    fn test_edges() {
        let path = Edges::default().outer_path();
        assert_eq!(path.subpath_count(), 8);
        assert!(path.bounds().unwrap().approx_eq(&EYE_RECT, 1e-6));
        assert_eq!(Edges::new(0.0).outer_path().subpath_count(), 8);
    }

    #[test_case(EyeInnerStyle::Both, 2 + 5 + 5)]
    #[test_case(EyeInnerStyle::LeftOnly, 2 + 5 + 1)]
    #[test_case(EyeInnerStyle::RightOnly, 2 + 1 + 5)]
    fn test_dot_drag_inner_style(style: EyeInnerStyle, subpaths: usize) {
        let eye = DotDragHorizontal::new(style);
        assert_eq!(eye.outer_path().subpath_count(), subpaths);
        assert_eq!(eye.settings()[keys::EYE_INNER_STYLE], SettingValue::Int(style.raw()));
    }

    #[test]
    fn test_dot_drag_rejects_unknown_style() {
        let mut eye = DotDragHorizontal::new(EyeInnerStyle::LeftOnly);
        assert!(!eye.set_setting(&SettingValue::Int(5), keys::EYE_INNER_STYLE));
        assert_eq!(eye, DotDragHorizontal::new(EyeInnerStyle::LeftOnly));
        assert!(eye.set_setting(&SettingValue::Int(2), keys::EYE_INNER_STYLE));
        assert_eq!(eye, DotDragHorizontal::new(EyeInnerStyle::RightOnly));
    }
}
