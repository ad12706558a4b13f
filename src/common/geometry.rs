use std::f64::consts::{FRAC_PI_2, PI, TAU};

use bitflags::bitflags;
use num_traits::clamp;

use super::path::{Path, Point, Rect, KAPPA};

// Design square
//------------------------------------------------------------------------------

/// Side of the square every eye and pupil is authored in
pub const DESIGN_SIZE: f64 = 90.0;

/// One QR module in design units. The design square is 9 modules wide, the 7 module finder
/// pattern plus one module of margin on each side.
pub const MODULE_SIZE: f64 = 10.0;

/// Largest corner radius of a single module
pub const MAX_MODULE_CORNER_RADIUS: f64 = 5.0;

pub const DESIGN_RECT: Rect = Rect::new(0.0, 0.0, DESIGN_SIZE, DESIGN_SIZE);

/// Outer edge of the finder pattern ring
pub const EYE_RECT: Rect = Rect::new(10.0, 10.0, 70.0, 70.0);

/// Inner edge of the finder pattern ring
pub const EYE_HOLE_RECT: Rect = Rect::new(20.0, 20.0, 50.0, 50.0);

/// Native region of every pupil
pub const PUPIL_RECT: Rect = Rect::new(30.0, 30.0, 30.0, 30.0);

// Transform
//------------------------------------------------------------------------------

/// Axis-aligned affine map: scale about the origin, then translate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub sx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self { sx: 1.0, sy: 1.0, tx: 0.0, ty: 0.0 };

    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self { sx, sy, tx: 0.0, ty: 0.0 }
    }

    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self { sx: 1.0, sy: 1.0, tx, ty }
    }

    /// Applies `self` first, then `next`
    pub fn then(self, next: Transform) -> Self {
        Self {
            sx: next.sx * self.sx,
            sy: next.sy * self.sy,
            tx: next.sx * self.tx + next.tx,
            ty: next.sy * self.ty + next.ty,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(self.sx * p.x + self.tx, self.sy * p.y + self.ty)
    }

    /// Maps `region` of the design square onto a `target` sized square anchored at the origin.
    /// Eyes preview the whole design square, pupils only their 30x30 region.
    pub fn preview(target: f64, region: Rect) -> Self {
        let sx = target / region.width;
        let sy = target / region.height;
        Self::scale(sx, sy).then(Self::translate(-region.x * sx, -region.y * sy))
    }
}

// Mirroring
//------------------------------------------------------------------------------

pub fn mirror_horizontal(path: &Path) -> Path {
    mirror(path, Transform::scale(-1.0, 1.0).then(Transform::translate(DESIGN_SIZE, 0.0)))
}

pub fn mirror_vertical(path: &Path) -> Path {
    mirror(path, Transform::scale(1.0, -1.0).then(Transform::translate(0.0, DESIGN_SIZE)))
}

pub fn mirror_both(path: &Path) -> Path {
    mirror(path, Transform::scale(-1.0, -1.0).then(Transform::translate(DESIGN_SIZE, DESIGN_SIZE)))
}

// Open sub-paths would leave a seam where the reflected start and end meet
fn mirror(path: &Path, transform: Transform) -> Path {
    path.transform(&transform).close_subpaths()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Flip {
    #[default]
    None = 0,
    Horizontal = 1,
    Vertical = 2,
    Both = 3,
}

impl Flip {
    pub const ALL: [Flip; 4] = [Flip::None, Flip::Horizontal, Flip::Vertical, Flip::Both];

    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Self::None),
            1 => Some(Self::Horizontal),
            2 => Some(Self::Vertical),
            3 => Some(Self::Both),
            _ => None,
        }
    }

    pub fn raw(self) -> i64 {
        self as i64
    }

    /// Combines two flips as if applied one after the other
    pub fn compose(self, other: Flip) -> Self {
        match Self::from_raw(self.raw() ^ other.raw()) {
            Some(f) => f,
            None => unreachable!("Xor of two flips is a flip"),
        }
    }

    pub fn apply(self, path: &Path) -> Path {
        match self {
            Self::None => path.clone(),
            Self::Horizontal => mirror_horizontal(path),
            Self::Vertical => mirror_vertical(path),
            Self::Both => mirror_both(path),
        }
    }
}

// Corners
//------------------------------------------------------------------------------

bitflags! {
    /// Corner selection for corner-aware constructions
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Corners: u8 {
        const TOP_LEFT = 1;
        const TOP_RIGHT = 1 << 1;
        const BOTTOM_LEFT = 1 << 2;
        const BOTTOM_RIGHT = 1 << 3;
    }
}

impl Corners {
    pub fn from_raw(raw: i64) -> Option<Self> {
        u8::try_from(raw).ok().and_then(Self::from_bits)
    }

    pub fn raw(self) -> i64 {
        self.bits() as i64
    }
}

// Corner-selective rounding
//------------------------------------------------------------------------------

/// Corner radius for a unit `fraction` of [`MAX_MODULE_CORNER_RADIUS`]; out of range
/// fractions are clamped.
pub fn corner_radius(fraction: f64) -> f64 {
    MAX_MODULE_CORNER_RADIUS * clamp_fraction(fraction)
}

pub fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        return 0.0;
    }
    clamp(fraction, 0.0, 1.0)
}

/// Rect whose `corners` are rounded with `radius` while the remaining corners stay sharp
pub fn rounded_rect(rect: Rect, radius: f64, corners: Corners) -> Path {
    let pick = |c: Corners| if corners.contains(c) { radius } else { 0.0 };
    rounded_rect_with_radii(
        rect,
        [
            pick(Corners::TOP_LEFT),
            pick(Corners::TOP_RIGHT),
            pick(Corners::BOTTOM_LEFT),
            pick(Corners::BOTTOM_RIGHT),
        ],
    )
}

/// Rect with an individual radius per corner, in top-left, top-right, bottom-left,
/// bottom-right order. Each radius is limited to half the shorter side; zero keeps the
/// corner sharp.
pub fn rounded_rect_with_radii(rect: Rect, radii: [f64; 4]) -> Path {
    let limit = rect.width.min(rect.height) / 2.0;
    let [tl, tr, bl, br] = radii.map(|r| if r.is_nan() { 0.0 } else { clamp(r, 0.0, limit) });
    let (x, y, mx, my) = (rect.x, rect.y, rect.max_x(), rect.max_y());
    let k = 1.0 - KAPPA;

    let mut path = Path::new().move_to(x + tl, y).line_to(mx - tr, y);
    if tr > 0.0 {
        path = path.cubic_to(mx - tr * k, y, mx, y + tr * k, mx, y + tr);
    }
    path = path.line_to(mx, my - br);
    if br > 0.0 {
        path = path.cubic_to(mx, my - br * k, mx - br * k, my, mx - br, my);
    }
    path = path.line_to(x + bl, my);
    if bl > 0.0 {
        path = path.cubic_to(x + bl * k, my, x, my - bl * k, x, my - bl);
    }
    path = path.line_to(x, y + tl);
    if tl > 0.0 {
        path = path.cubic_to(x, y + tl * k, x + tl * k, y, x + tl, y);
    }
    path.close()
}

/// Single module with its selected corners rounded by a unit fraction of the module radius
pub fn rounded_module(rect: Rect, corners: Corners, fraction: f64) -> Path {
    rounded_rect(rect, corner_radius(fraction), corners)
}

// Corner-selective cut-in
//------------------------------------------------------------------------------

// Per corner, clockwise tracing order: the corner point, the scoop's start and end angles
// around it, and the sign of the rounded corner's centre offset
const CUT_CORNERS: [(Corners, (f64, f64), (f64, f64), (f64, f64)); 4] = [
    (Corners::TOP_RIGHT, (PI, FRAC_PI_2), (-1.0, 1.0), (-FRAC_PI_2, 0.0)),
    (Corners::BOTTOM_RIGHT, (-FRAC_PI_2, -PI), (-1.0, -1.0), (0.0, FRAC_PI_2)),
    (Corners::BOTTOM_LEFT, (0.0, -FRAC_PI_2), (1.0, -1.0), (FRAC_PI_2, PI)),
    (Corners::TOP_LEFT, (FRAC_PI_2, 0.0), (1.0, 1.0), (PI, PI + FRAC_PI_2)),
];

/// Solid rect whose `corners` are scooped inwards (concave) while the others are rounded
/// outwards (convex). An empty selection rounds every corner.
pub fn cut_in_rect(rect: Rect, radius: f64, corners: Corners) -> Path {
    let r = clamp(radius, 0.0, rect.width.min(rect.height) / 2.0);
    let corner_point = |c: Corners| match c {
        Corners::TOP_RIGHT => Point::new(rect.max_x(), rect.y),
        Corners::BOTTOM_RIGHT => Point::new(rect.max_x(), rect.max_y()),
        Corners::BOTTOM_LEFT => Point::new(rect.x, rect.max_y()),
        _ => Point::new(rect.x, rect.y),
    };

    let mut path = Path::new().move_to(rect.x + r, rect.y);
    for (corner, (in_start, in_end), (ox, oy), (out_start, out_end)) in CUT_CORNERS {
        let p = corner_point(corner);
        let (center, start, end) = if corners.contains(corner) {
            (p, in_start, in_end)
        } else {
            (Point::new(p.x + ox * r, p.y + oy * r), out_start, out_end)
        };
        let (s, c) = start.sin_cos();
        path = path
            .line_to(center.x + r * c, center.y + r * s)
            .arc(center, r, start, end);
    }
    path.close()
}

/// Shield quadrants of the eye ring. Each template is one closed quarter of the ring, with
/// its outer corner either scooped in or rounded out. Only the top-left pair is authored,
/// the others are its reflections.
pub mod shield {
    use super::*;

    const OUTER_RADIUS: f64 = 15.0;
    const INNER_RADIUS: f64 = 7.0;

    pub fn tl_in() -> Path {
        let origin = Point::new(EYE_RECT.x, EYE_RECT.y);
        let inner_radius = OUTER_RADIUS + MODULE_SIZE;
        // Where the inner scoop meets the hole's edges
        let reach = (inner_radius * inner_radius - MODULE_SIZE * MODULE_SIZE).sqrt();
        Path::new()
            .move_to(45.0, 10.0)
            .line_to(origin.x + OUTER_RADIUS, origin.y)
            .arc(origin, OUTER_RADIUS, 0.0, FRAC_PI_2)
            .line_to(10.0, 45.0)
            .line_to(20.0, 45.0)
            .line_to(20.0, origin.y + reach)
            .arc(origin, inner_radius, reach.atan2(MODULE_SIZE), MODULE_SIZE.atan2(reach))
            .line_to(45.0, 20.0)
            .close()
    }

    pub fn tl_out() -> Path {
        let (r, k) = (OUTER_RADIUS, OUTER_RADIUS * KAPPA);
        let (ir, ik) = (INNER_RADIUS, INNER_RADIUS * KAPPA);
        Path::new()
            .move_to(45.0, 10.0)
            .line_to(10.0 + r, 10.0)
            .cubic_to(10.0 + r - k, 10.0, 10.0, 10.0 + r - k, 10.0, 10.0 + r)
            .line_to(10.0, 45.0)
            .line_to(20.0, 45.0)
            .line_to(20.0, 20.0 + ir)
            .cubic_to(20.0, 20.0 + ir - ik, 20.0 + ir - ik, 20.0, 20.0 + ir, 20.0)
            .line_to(45.0, 20.0)
            .close()
    }

    pub fn tr_in() -> Path {
        mirror_horizontal(&tl_in())
    }

    pub fn tr_out() -> Path {
        mirror_horizontal(&tl_out())
    }

    pub fn bl_in() -> Path {
        mirror_vertical(&tl_in())
    }

    pub fn bl_out() -> Path {
        mirror_vertical(&tl_out())
    }

    pub fn br_in() -> Path {
        mirror_both(&tl_in())
    }

    pub fn br_out() -> Path {
        mirror_both(&tl_out())
    }

    /// Full ring, quadrants in top-left, top-right, bottom-left, bottom-right order.
    /// Selected corners are scooped in, the rest rounded out.
    pub fn ring(corners: Corners) -> Path {
        let pick = |c: Corners, pulled_in: fn() -> Path, pushed_out: fn() -> Path| {
            if corners.contains(c) {
                pulled_in()
            } else {
                pushed_out()
            }
        };
        Path::concat([
            pick(Corners::TOP_LEFT, tl_in, tl_out),
            pick(Corners::TOP_RIGHT, tr_in, tr_out),
            pick(Corners::BOTTOM_LEFT, bl_in, bl_out),
            pick(Corners::BOTTOM_RIGHT, br_in, br_out),
        ])
    }
}

// Module grids
//------------------------------------------------------------------------------

pub fn module_rect(origin: Point, col: usize, row: usize) -> Rect {
    Rect::new(
        origin.x + col as f64 * MODULE_SIZE,
        origin.y + row as f64 * MODULE_SIZE,
        MODULE_SIZE,
        MODULE_SIZE,
    )
}

/// (col, row) of the 24 modules forming the finder pattern's ring, row by row
pub fn ring_modules() -> impl Iterator<Item = (usize, usize)> {
    (0..7).flat_map(|row| (0..7).map(move |col| (col, row))).filter(|&(col, row)| {
        row == 0 || row == 6 || col == 0 || col == 6
    })
}

// Polar outlines
//------------------------------------------------------------------------------

/// Star polygon with `spikes` tips alternating between the two radii; the first tip points
/// straight up.
pub fn star(center: Point, outer: f64, inner: f64, spikes: usize) -> Path {
    let n = spikes.max(2) * 2;
    Path::polygon((0..n).map(|i| {
        let angle = i as f64 * TAU / n as f64 - FRAC_PI_2;
        let r = if i % 2 == 0 { outer } else { inner };
        Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
    }))
}

/// Closed outline whose radius ripples by `amplitude` around `radius`, `waves` times per turn.
/// The ripple only ever pulls inwards so the outline stays within `radius`.
pub fn rippled_circle(center: Point, radius: f64, amplitude: f64, waves: usize) -> Path {
    let samples = waves.max(1) * 8;
    Path::polygon((0..samples).map(|i| {
        let angle = i as f64 * TAU / samples as f64;
        let r = radius - amplitude * (1.0 - (angle * waves as f64).cos()) / 2.0;
        Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
    }))
}
