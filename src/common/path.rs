use std::fmt::Write;

use super::geometry::Transform;

/// Cubic bezier handle length for approximating a quarter circle
pub const KAPPA: f64 = 0.552_284_749_831;

// Point
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

// Rect
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_corners(min: Point, max: Point) -> Self {
        Self { x: min.x, y: min.y, width: max.x - min.x, height: max.y - min.y }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains_rect(&self, other: &Rect, tolerance: f64) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.max_x() <= self.max_x() + tolerance
            && other.max_y() <= self.max_y() + tolerance
    }

    pub fn approx_eq(&self, other: &Rect, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.max_x() - other.max_x()).abs() <= tolerance
            && (self.max_y() - other.max_y()).abs() <= tolerance
    }
}

// Path command
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { ctrl1: Point, ctrl2: Point, end: Point },
    Close,
}

impl PathCommand {
    pub fn map(self, f: impl Fn(Point) -> Point) -> Self {
        match self {
            Self::MoveTo(p) => Self::MoveTo(f(p)),
            Self::LineTo(p) => Self::LineTo(f(p)),
            Self::CubicTo { ctrl1, ctrl2, end } => {
                Self::CubicTo { ctrl1: f(ctrl1), ctrl2: f(ctrl2), end: f(end) }
            }
            Self::Close => Self::Close,
        }
    }

    fn approx_eq(&self, other: &PathCommand, tolerance: f64) -> bool {
        match (self, other) {
            (Self::MoveTo(a), Self::MoveTo(b)) | (Self::LineTo(a), Self::LineTo(b)) => {
                a.approx_eq(b, tolerance)
            }
            (
                Self::CubicTo { ctrl1: a1, ctrl2: a2, end: a3 },
                Self::CubicTo { ctrl1: b1, ctrl2: b2, end: b3 },
            ) => a1.approx_eq(b1, tolerance) && a2.approx_eq(b2, tolerance) && a3.approx_eq(b3, tolerance),
            (Self::Close, Self::Close) => true,
            _ => false,
        }
    }
}

// Path
//------------------------------------------------------------------------------

/// Vector outline in design-square coordinates. Sub-paths are meant to be filled with the
/// even-odd rule, which is how rings are punched out of their outer shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    cmds: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.cmds.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.cmds.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    pub fn cubic_to(mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) -> Self {
        self.cmds.push(PathCommand::CubicTo {
            ctrl1: Point::new(c1x, c1y),
            ctrl2: Point::new(c2x, c2y),
            end: Point::new(x, y),
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.cmds.push(PathCommand::Close);
        self
    }

    /// Appends a circular arc around `center`, from angle `start` to `end` in radians. Angles
    /// grow clockwise on screen since y points down. The current point should already sit on
    /// the arc's start.
    pub fn arc(mut self, center: Point, radius: f64, start: f64, end: f64) -> Self {
        let sweep = end - start;
        if sweep == 0.0 || radius <= 0.0 {
            return self;
        }

        // Split into pieces of at most a quarter turn
        let pieces = (sweep.abs() / std::f64::consts::FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / pieces as f64;
        let k = 4.0 / 3.0 * (step / 4.0).tan() * radius;

        for i in 0..pieces {
            let a0 = start + step * i as f64;
            let a1 = a0 + step;
            let (s0, c0) = a0.sin_cos();
            let (s1, c1) = a1.sin_cos();
            self = self.cubic_to(
                center.x + radius * c0 - k * s0,
                center.y + radius * s0 + k * c0,
                center.x + radius * c1 + k * s1,
                center.y + radius * s1 - k * c1,
                center.x + radius * c1,
                center.y + radius * s1,
            );
        }
        self
    }

    pub fn rect(rect: Rect) -> Self {
        Self::new()
            .move_to(rect.x, rect.y)
            .line_to(rect.max_x(), rect.y)
            .line_to(rect.max_x(), rect.max_y())
            .line_to(rect.x, rect.max_y())
            .close()
    }

    pub fn ellipse(rect: Rect) -> Self {
        Self::superellipse(rect, KAPPA)
    }

    /// Four-segment closed curve inscribed in `rect`. A handle factor of [`KAPPA`] yields an
    /// ellipse, larger factors square it off towards the rect.
    pub fn superellipse(rect: Rect, handle: f64) -> Self {
        let c = rect.center();
        let (rx, ry) = (rect.width / 2.0, rect.height / 2.0);
        let (kx, ky) = (rx * handle, ry * handle);
        Self::new()
            .move_to(c.x + rx, c.y)
            .cubic_to(c.x + rx, c.y + ky, c.x + kx, c.y + ry, c.x, c.y + ry)
            .cubic_to(c.x - kx, c.y + ry, c.x - rx, c.y + ky, c.x - rx, c.y)
            .cubic_to(c.x - rx, c.y - ky, c.x - kx, c.y - ry, c.x, c.y - ry)
            .cubic_to(c.x + kx, c.y - ry, c.x + rx, c.y - ky, c.x + rx, c.y)
            .close()
    }

    /// Closed polygon through `points`
    pub fn polygon(points: impl IntoIterator<Item = Point>) -> Self {
        let mut path = Self::new();
        for (i, p) in points.into_iter().enumerate() {
            path = if i == 0 { path.move_to(p.x, p.y) } else { path.line_to(p.x, p.y) };
        }
        if path.is_empty() {
            return path;
        }
        path.close()
    }

    /// Appends every sub-path of `other` after this path's own
    pub fn append(mut self, other: Path) -> Self {
        self.cmds.extend(other.cmds);
        self
    }

    pub fn concat(paths: impl IntoIterator<Item = Path>) -> Self {
        paths.into_iter().fold(Self::new(), Self::append)
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.cmds
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn subpath_count(&self) -> usize {
        self.cmds.iter().filter(|c| matches!(c, PathCommand::MoveTo(_))).count()
    }

    pub fn transform(&self, transform: &Transform) -> Path {
        Path { cmds: self.cmds.iter().map(|c| c.map(|p| transform.apply(p))).collect() }
    }

    /// Terminates every sub-path that was left open with an explicit close
    pub fn close_subpaths(self) -> Path {
        let mut cmds = Vec::with_capacity(self.cmds.len() + 1);
        let mut open = false;
        for cmd in self.cmds {
            match cmd {
                PathCommand::MoveTo(_) => {
                    if open {
                        cmds.push(PathCommand::Close);
                    }
                    open = false;
                }
                PathCommand::LineTo(_) | PathCommand::CubicTo { .. } => open = true,
                PathCommand::Close => open = false,
            }
            cmds.push(cmd);
        }
        if open {
            cmds.push(PathCommand::Close);
        }
        Path { cmds }
    }

    pub fn approx_eq(&self, other: &Path, tolerance: f64) -> bool {
        self.cmds.len() == other.cmds.len()
            && self.cmds.iter().zip(&other.cmds).all(|(a, b)| a.approx_eq(b, tolerance))
    }

    /// Tight bounding box of the drawn outline, including curve extrema. Control points that
    /// the curve never reaches are not counted.
    pub fn bounds(&self) -> Option<Rect> {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut include = |p: Point| {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        };

        let mut cur = Point::default();
        for cmd in &self.cmds {
            match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                    include(p);
                    cur = p;
                }
                PathCommand::CubicTo { ctrl1, ctrl2, end } => {
                    include(end);
                    for t in cubic_extrema(cur.x, ctrl1.x, ctrl2.x, end.x)
                        .into_iter()
                        .chain(cubic_extrema(cur.y, ctrl1.y, ctrl2.y, end.y))
                        .flatten()
                    {
                        include(cubic_point(cur, ctrl1, ctrl2, end, t));
                    }
                    cur = end;
                }
                PathCommand::Close => {}
            }
        }

        if min.x.is_finite() && max.x.is_finite() {
            Some(Rect::from_corners(min, max))
        } else {
            None
        }
    }

    /// SVG path data, coordinates rounded to three decimals
    pub fn to_svg_data(&self) -> String {
        let mut data = String::new();
        for cmd in &self.cmds {
            // Writing into a String never fails
            let _ = match cmd {
                PathCommand::MoveTo(p) => write!(data, "M{} {}", num(p.x), num(p.y)),
                PathCommand::LineTo(p) => write!(data, "L{} {}", num(p.x), num(p.y)),
                PathCommand::CubicTo { ctrl1, ctrl2, end } => write!(
                    data,
                    "C{} {} {} {} {} {}",
                    num(ctrl1.x),
                    num(ctrl1.y),
                    num(ctrl2.x),
                    num(ctrl2.y),
                    num(end.x),
                    num(end.y)
                ),
                PathCommand::Close => write!(data, "Z"),
            };
        }
        data
    }
}

impl FromIterator<Path> for Path {
    fn from_iter<I: IntoIterator<Item = Path>>(iter: I) -> Self {
        Self::concat(iter)
    }
}

fn num(v: f64) -> f64 {
    let r = (v * 1000.0).round() / 1000.0;
    // Avoid printing "-0"
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

// Parameters strictly inside (0, 1) where the derivative of one cubic coordinate vanishes
fn cubic_extrema(p0: f64, p1: f64, p2: f64, p3: f64) -> [Option<f64>; 2] {
    // B'(t)/3 = a t^2 + b t + c
    let a = -p0 + 3.0 * p1 - 3.0 * p2 + p3;
    let b = 2.0 * (p0 - 2.0 * p1 + p2);
    let c = p1 - p0;
    let inside = |t: f64| (t > 0.0 && t < 1.0).then_some(t);

    if a.abs() < 1e-12 {
        if b.abs() < 1e-12 {
            return [None, None];
        }
        return [inside(-c / b), None];
    }

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return [None, None];
    }
    let sq = disc.sqrt();
    [inside((-b + sq) / (2.0 * a)), inside((-b - sq) / (2.0 * a))]
}

#[cfg(test)]
mod path_tests {
    use super::*;

    #[test]
    fn test_rect_bounds() {
        let path = Path::rect(Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(path.bounds(), Some(Rect::new(10.0, 20.0, 30.0, 40.0)));
        assert_eq!(path.subpath_count(), 1);
    }

    #[test]
    fn test_ellipse_bounds() {
        let path = Path::ellipse(Rect::new(10.0, 10.0, 70.0, 70.0));
        let bounds = path.bounds().unwrap();
        assert!(bounds.approx_eq(&Rect::new(10.0, 10.0, 70.0, 70.0), 1e-9));
    }

    #[test]
    fn test_curve_extrema_counted() {
        // Control points overshoot the end points, the curve itself peaks at y = 15
        let path = Path::new().move_to(0.0, 0.0).cubic_to(0.0, 20.0, 10.0, 20.0, 10.0, 0.0);
        let bounds = path.bounds().unwrap();
        assert!((bounds.max_y() - 15.0).abs() < 1e-9);
        assert!((bounds.max_x() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_bounds() {
        assert_eq!(Path::new().bounds(), None);
    }

    #[test]
    fn test_arc_endpoints() {
        let center = Point::new(45.0, 45.0);
        let path = Path::new().move_to(60.0, 45.0).arc(center, 15.0, 0.0, std::f64::consts::PI);
        assert_eq!(path.len(), 3);
        let PathCommand::CubicTo { end, .. } = path.commands()[2] else {
            panic!("Expected a curve");
        };
        assert!(end.approx_eq(&Point::new(30.0, 45.0), 1e-9));
        let bounds = path.bounds().unwrap();
        assert!((bounds.max_y() - 60.0).abs() < 1e-2);
    }

    #[test]
    fn test_close_subpaths() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .line_to(1.0, 0.0)
            .move_to(5.0, 5.0)
            .line_to(6.0, 5.0)
            .close()
            .move_to(9.0, 9.0)
            .line_to(9.0, 10.0);
        let closed = path.close_subpaths();
        let closes = closed.commands().iter().filter(|c| **c == PathCommand::Close).count();
        assert_eq!(closes, 3);
        assert_eq!(closed.clone().close_subpaths(), closed);
    }

    #[test]
    fn test_polygon() {
        let path = Path::polygon([Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 3.0)]);
        assert_eq!(path.len(), 4);
        assert_eq!(path.commands()[3], PathCommand::Close);
        assert!(Path::polygon(Vec::<Point>::new()).is_empty());
    }

    #[test]
    fn test_svg_data() {
        let path = Path::new().move_to(10.0, 10.0).line_to(4.05, -0.0).cubic_to(1.0, 2.0, 3.0, 4.0, 5.0, 6.0).close();
        assert_eq!(path.to_svg_data(), "M10 10L4.05 0C1 2 3 4 5 6Z");
    }
}
