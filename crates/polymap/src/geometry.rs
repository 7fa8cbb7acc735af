//! Core geometry types for polymap: points, lines and circles.
//!
//! ## Rust Lesson #3: Value Types
//!
//! Every type here is a small `Copy` value. Methods never mutate `self`;
//! they return a new value instead (`p.add(q)`, `line.reversed()`), so a
//! point handed to another function can never be changed behind your back.
//!
//! Floating-point classification (is this point on that line? is this line
//! tangent?) never uses `==` directly. Everything goes through
//! [`approx_zero`] with [`EPSILON`], scaled by the magnitude of the values
//! being compared.

use std::f64::consts::{FRAC_PI_2, PI};

/// Tolerance for on-line, on-boundary and tangency classification.
pub const EPSILON: f64 = 1e-9;

/// Decimal places kept by [`Point::offset`] and [`Line::length`].
pub const OFFSET_PRECISION: i32 = 6;

/// Round `value` to `decimals` decimal places.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// True if `value` is zero within [`EPSILON`] relative to `scale`.
///
/// Scales below 1.0 are treated as 1.0 so tiny magnitudes still get an
/// absolute tolerance.
#[inline]
pub fn approx_zero(value: f64, scale: f64) -> bool {
    value.abs() <= EPSILON * scale.abs().max(1.0)
}

/// Errors raised by degenerate geometry.
///
/// ## Rust Lesson #20: Error Handling
///
/// Degenerate input is reported through `Result<T, GeometryError>` instead of
/// letting `NaN` leak into the output. Callers bubble it up with `?`.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Both endpoints of a line coincide, so it has no direction.
    DegenerateLine,
    /// A vertical line was asked for its `y = f(x)` form.
    VerticalLine,
    /// The polygon side (outside line length plus two corner caps) is not positive.
    ZeroSideLength { side_length: f64 },
    /// An inside generation reached or crossed the origin.
    CollapsedGeneration { generation: usize, side: usize },
    /// A noise function returned a value the generator cannot use.
    InvalidNoise { generation: usize, value: f64 },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::DegenerateLine => write!(f, "line endpoints coincide"),
            GeometryError::VerticalLine => write!(f, "vertical line has no y = f(x) form"),
            GeometryError::ZeroSideLength { side_length } => {
                write!(f, "polygon side length must be positive, got {}", side_length)
            }
            GeometryError::CollapsedGeneration { generation, side } => write!(
                f,
                "generation {} collapsed through the origin on side {}",
                generation, side
            ),
            GeometryError::InvalidNoise { generation, value } => {
                write!(f, "noise value {} is unusable for generation {}", value, generation)
            }
        }
    }
}

impl std::error::Error for GeometryError {}

// ============================================================================
// POINT
// ============================================================================

/// A 2D point (or vector) with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Center of the coordinate system.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn add(&self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    #[inline]
    pub fn scale(&self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    /// Vector from `other` to `self`.
    #[inline]
    pub fn difference(&self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    #[inline]
    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn to_coordinates(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[inline]
    pub fn distance_to_origin(&self) -> f64 {
        self.distance(Point::ORIGIN)
    }

    /// Angle in `[0, π)` between the line through both points and the x axis.
    ///
    /// A vertical pair (`dx == 0`) is exactly `π/2`.
    pub fn horizontal_angle(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        if dx == 0.0 {
            return FRAC_PI_2;
        }
        (dy / dx).atan().rem_euclid(PI)
    }

    #[inline]
    pub fn horizontal_angle_to_origin(&self) -> f64 {
        self.horizontal_angle(Point::ORIGIN)
    }

    /// Point reached by walking `distance` along `angle` (taken mod π).
    ///
    /// A negative distance walks the opposite way. The offset is rounded to
    /// [`OFFSET_PRECISION`] decimals so points built from the same inputs
    /// compare equal downstream.
    pub fn offset(&self, angle: f64, distance: f64) -> Point {
        let angle = angle.rem_euclid(PI);
        let delta = Point::new(
            round_to(distance * angle.cos(), OFFSET_PRECISION),
            round_to(distance * angle.sin(), OFFSET_PRECISION),
        );
        self.add(delta)
    }

    /// Approximate equality within [`EPSILON`] scaled by the coordinates.
    pub fn approx_eq(&self, other: Point) -> bool {
        let scale = self.x.abs().max(self.y.abs()).max(other.x.abs()).max(other.y.abs());
        approx_zero(self.x - other.x, scale) && approx_zero(self.y - other.y, scale)
    }
}

// ============================================================================
// LINE
// ============================================================================

/// Implicit line `a·x + b·y + c = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEquation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl LineEquation {
    /// Evaluate the left-hand side at `point`. Zero means the point is on the line.
    #[inline]
    pub fn eval(&self, point: Point) -> f64 {
        self.a * point.x + self.b * point.y + self.c
    }

    #[inline]
    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// True if `a` and `b` are both zero, i.e. no line at all.
    pub fn is_degenerate(&self) -> bool {
        approx_zero(self.a, 0.0) && approx_zero(self.b, 0.0)
    }

    /// Same line with a unit normal `(a, b)` and its first non-zero
    /// coefficient positive. Two equations describe the same line iff their
    /// normalized forms match.
    pub fn normalized(&self) -> Option<LineEquation> {
        if self.is_degenerate() {
            return None;
        }
        let norm = self.a.hypot(self.b);
        let sign = if approx_zero(self.a / norm, 0.0) {
            self.b.signum()
        } else {
            self.a.signum()
        };
        let k = sign / norm;
        Some(LineEquation { a: self.a * k, b: self.b * k, c: self.c * k })
    }
}

/// `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFunction {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFunction {
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// A line segment between two boundary points.
///
/// The angle and length are derived once in [`Line::new`]. Equality ignores
/// endpoint order: `Line::new(a, b) == Line::new(b, a)`.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    start: Point,
    end: Point,
    angle: f64,
    length: f64,
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            angle: start.horizontal_angle(end),
            length: round_to(start.distance(end), OFFSET_PRECISION),
        }
    }

    /// Line from `point` walking `distance` along `angle`.
    pub fn from_angle_distance(point: Point, angle: f64, distance: f64) -> Self {
        Self::new(point, point.offset(angle, distance))
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    #[inline]
    pub fn boundaries(&self) -> (Point, Point) {
        (self.start, self.end)
    }

    /// Angle against the x axis, in `[0, π)`.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Distance between the endpoints, rounded to [`OFFSET_PRECISION`] decimals.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Direction vector from start to end.
    #[inline]
    pub fn direction(&self) -> Point {
        self.end.difference(self.start)
    }

    pub fn is_degenerate(&self) -> bool {
        self.equation().is_degenerate()
    }

    /// Coefficients from the two points: `a = dy`, `b = -dx`, `c = y1·dx - x1·dy`.
    pub fn equation(&self) -> LineEquation {
        let delta = self.direction();
        LineEquation {
            a: delta.y,
            b: -delta.x,
            c: self.start.y * delta.x - self.start.x * delta.y,
        }
    }

    /// The `y = f(x)` form of this line.
    pub fn function_of_x(&self) -> Result<LinearFunction, GeometryError> {
        let eq = self.equation();
        if eq.is_degenerate() {
            return Err(GeometryError::DegenerateLine);
        }
        if approx_zero(eq.b, eq.a) {
            return Err(GeometryError::VerticalLine);
        }
        Ok(LinearFunction { slope: -eq.a / eq.b, intercept: -eq.c / eq.b })
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        Point::new((self.start.x + self.end.x) / 2.0, (self.start.y + self.end.y) / 2.0)
    }

    /// Axis-aligned bounding box as `(min, max)`.
    pub fn bounding_box(&self) -> (Point, Point) {
        (
            Point::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
            Point::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y)),
        )
    }

    /// Is `point` on the infinite line through both endpoints?
    pub fn contains_point(&self, point: Point) -> bool {
        let eq = self.equation();
        approx_zero(eq.eval(point), eq.a.abs() + eq.b.abs())
    }

    /// Is `point` on the segment between the endpoints?
    pub fn contains_point_on_segment(&self, point: Point) -> bool {
        let (min, max) = self.bounding_box();
        let scale = min.x.abs().max(min.y.abs()).max(max.x.abs()).max(max.y.abs()).max(1.0);
        let tolerance = EPSILON * scale;

        let inside_box = point.x >= min.x - tolerance
            && point.x <= max.x + tolerance
            && point.y >= min.y - tolerance
            && point.y <= max.y + tolerance;

        inside_box && self.contains_point(point)
    }

    /// `count` evenly spaced interior points, start to end.
    pub fn subdivision_points(&self, count: usize) -> Vec<Point> {
        let delta = self.direction();
        let steps = (count + 1) as f64;
        (1..=count)
            .map(|k| self.start.add(delta.scale(k as f64 / steps)))
            .collect()
    }

    /// Points `distance` inward from the start and from the end.
    pub fn points_by_distance(&self, distance: f64) -> Result<(Point, Point), GeometryError> {
        let delta = self.direction();
        let raw_length = delta.x.hypot(delta.y);
        if approx_zero(raw_length, 0.0) {
            return Err(GeometryError::DegenerateLine);
        }
        let step = delta.scale(distance / raw_length);
        Ok((self.start.add(step), self.end.difference(step)))
    }

    /// Do both lines point the same way (non-negative dot product of directions)?
    ///
    /// Used to pair endpoints of two segments without crossing them.
    pub fn is_same_direction(&self, other: &Line) -> bool {
        self.direction().dot(other.direction()) >= 0.0
    }

    /// Same segment with start and end swapped.
    #[inline]
    pub fn reversed(&self) -> Line {
        Line::new(self.end, self.start)
    }

    /// Segment parallel to this one, centered at `center`, reaching
    /// `half_length` to either side.
    pub fn parallel_through(&self, center: Point, half_length: f64) -> Line {
        Line::new(
            center.offset(self.angle, half_length),
            center.offset(self.angle, -half_length),
        )
    }

    pub fn translate(&self, vector: Point) -> Line {
        Line::new(self.start.add(vector), self.end.add(vector))
    }

    pub fn scale(&self, factor: f64) -> Line {
        Line::new(self.start.scale(factor), self.end.scale(factor))
    }
}

// ============================================================================
// CIRCLE
// ============================================================================

/// `(x - cx)² + (y - cy)² - r²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleEquation {
    pub center: Point,
    pub radius: f64,
}

impl CircleEquation {
    #[inline]
    pub fn eval(&self, point: Point) -> f64 {
        let d = point.difference(self.center);
        d.x * d.x + d.y * d.y - self.radius * self.radius
    }

    /// Expanded form `x² + y² + d·x + e·y + f` as `(d, e, f)`.
    pub fn expanded(&self) -> (f64, f64, f64) {
        let (cx, cy) = self.center.to_coordinates();
        (
            -2.0 * cx,
            -2.0 * cy,
            cx * cx + cy * cy - self.radius * self.radius,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    #[inline]
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn equation(&self) -> CircleEquation {
        CircleEquation { center: self.center, radius: self.radius }
    }

    /// Strictly inside (boundary points are not inside).
    pub fn contains_point(&self, point: Point) -> bool {
        self.equation().eval(point) < 0.0 && !self.is_point_on_boundary(point)
    }

    pub fn is_point_on_boundary(&self, point: Point) -> bool {
        approx_zero(self.equation().eval(point), self.radius * self.radius)
    }

    /// Axis-aligned bounding box as `(min, max)`.
    pub fn bounding_box(&self) -> (Point, Point) {
        (
            Point::new(self.center.x - self.radius, self.center.y - self.radius),
            Point::new(self.center.x + self.radius, self.center.y + self.radius),
        )
    }

    pub fn translate(&self, vector: Point) -> Circle {
        Circle::new(self.center.add(vector), self.radius)
    }

    pub fn with_radius(&self, radius: f64) -> Circle {
        Circle::new(self.center, radius)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(p2), 5.0); // 3-4-5 triangle
        assert_eq!(p2.distance_to_origin(), 5.0);
    }

    #[test]
    fn vertical_angle_is_half_pi() {
        let p = Point::new(0.0, 5.0);
        assert_eq!(p.horizontal_angle_to_origin(), FRAC_PI_2);
        assert_eq!(Point::new(2.0, -1.0).horizontal_angle(Point::new(2.0, 7.0)), FRAC_PI_2);
    }

    #[test]
    fn angle_is_taken_mod_pi() {
        // (1, -1) lies on the line at 135 degrees, not -45
        let angle = Point::new(1.0, -1.0).horizontal_angle_to_origin();
        assert!((angle - 3.0 * PI / 4.0).abs() < 1e-12, "got {}", angle);
        assert!(angle >= 0.0 && angle < PI);
    }

    #[test]
    fn offset_distance_round_trip() {
        for &angle in &[0.0, 0.3, 1.2, FRAC_PI_2, 2.5, 4.0] {
            for &d in &[1.0, 7.25, -3.5] {
                let start = Point::new(1.5, -2.0);
                let moved = start.offset(angle, d);
                assert!((moved.distance(start) - d.abs()).abs() < 1e-5,
                    "angle {} distance {} measured {}", angle, d, moved.distance(start));
            }
        }
    }

    #[test]
    fn negative_offset_reverses_direction() {
        let forward = Point::ORIGIN.offset(0.7, 4.0);
        let backward = Point::ORIGIN.offset(0.7, -4.0);
        assert!(forward.approx_eq(backward.scale(-1.0)));
        // Angle back to origin stays the same line, orientation flips by pi
        let a = forward.horizontal_angle_to_origin();
        let b = backward.horizontal_angle_to_origin();
        assert!((a - b).abs() < 1e-5);
    }

    #[test]
    fn offset_is_rounded() {
        let p = Point::ORIGIN.offset(PI / 3.0, 1.0);
        assert_eq!(p.x, 0.5);
        assert_eq!(p.y, 0.866025);
    }

    #[test]
    fn line_equation_coefficients() {
        let line = Line::new(Point::new(1.0, 2.0), Point::new(4.0, 6.0));
        let eq = line.equation();
        assert_eq!(eq.coefficients(), (4.0, -3.0, 2.0 * 3.0 - 1.0 * 4.0));
        assert_eq!(eq.eval(line.start()), 0.0);
        assert_eq!(eq.eval(line.end()), 0.0);
    }

    #[test]
    fn vertical_line_has_no_function() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(0.0, 5.0));
        assert_eq!(line.angle(), FRAC_PI_2);
        assert_eq!(line.function_of_x(), Err(GeometryError::VerticalLine));
    }

    #[test]
    fn sloped_line_function() {
        let line = Line::new(Point::new(0.0, 1.0), Point::new(2.0, 5.0));
        let f = line.function_of_x().unwrap();
        assert!((f.slope - 2.0).abs() < 1e-12);
        assert!((f.eval(3.0) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_line_is_rejected() {
        let p = Point::new(3.0, 3.0);
        let line = Line::new(p, p);
        assert!(line.is_degenerate());
        assert_eq!(line.function_of_x(), Err(GeometryError::DegenerateLine));
        assert_eq!(line.points_by_distance(1.0), Err(GeometryError::DegenerateLine));
    }

    #[test]
    fn line_equality_ignores_order() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(-3.0, 0.5);
        assert_eq!(Line::new(a, b), Line::new(b, a));
        assert_eq!(Line::new(a, b).reversed(), Line::new(a, b));
    }

    #[test]
    fn point_on_line_and_segment() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(4.0, 4.0));
        assert!(line.contains_point(Point::new(2.0, 2.0)));
        assert!(line.contains_point(Point::new(10.0, 10.0)));
        assert!(!line.contains_point(Point::new(1.0, 2.0)));

        assert!(line.contains_point_on_segment(Point::new(2.0, 2.0)));
        assert!(!line.contains_point_on_segment(Point::new(10.0, 10.0)));
        // Accumulated float error still counts as on the line
        assert!(line.contains_point(Point::new(0.1 + 0.2, 0.3)));
    }

    #[test]
    fn subdivision_points_are_interior_and_even() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(8.0, 0.0));
        let points = line.subdivision_points(3);
        assert_eq!(points, vec![Point::new(2.0, 0.0), Point::new(4.0, 0.0), Point::new(6.0, 0.0)]);
        assert!(line.subdivision_points(0).is_empty());
    }

    #[test]
    fn points_by_distance_move_inward() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let (a, b) = line.points_by_distance(2.0).unwrap();
        assert_eq!(a, Point::new(2.0, 0.0));
        assert_eq!(b, Point::new(8.0, 0.0));
    }

    #[test]
    fn direction_agreement() {
        let a = Line::new(Point::new(0.0, 0.0), Point::new(5.0, 0.0));
        let b = Line::new(Point::new(1.0, 1.0), Point::new(3.0, 1.0));
        assert!(a.is_same_direction(&b));
        assert!(!a.is_same_direction(&b.reversed()));
    }

    #[test]
    fn parallel_line_keeps_angle() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(3.0, 3.0));
        let copy = line.parallel_through(Point::new(0.0, 2.0), 1.0);
        assert!((copy.angle() - line.angle()).abs() < 1e-6);
        assert!((copy.length() - 2.0).abs() < 1e-5);
        assert!(copy.midpoint().approx_eq(Point::new(0.0, 2.0)));
    }

    #[test]
    fn circle_classification() {
        let circle = Circle::new(Point::new(1.0, 1.0), 2.0);
        assert!(circle.contains_point(Point::new(1.5, 1.0)));
        assert!(!circle.contains_point(Point::new(3.0, 1.0)));
        assert!(circle.is_point_on_boundary(Point::new(3.0, 1.0)));
        assert!(!circle.is_point_on_boundary(Point::new(4.0, 1.0)));
        assert_eq!(circle.bounding_box(), (Point::new(-1.0, -1.0), Point::new(3.0, 3.0)));
    }

    #[test]
    fn circle_expanded_equation_matches() {
        let circle = Circle::new(Point::new(2.0, -1.0), 3.0);
        let (d, e, f) = circle.equation().expanded();
        let p = Point::new(0.5, 4.0);
        let expanded = p.x * p.x + p.y * p.y + d * p.x + e * p.y + f;
        assert!((expanded - circle.equation().eval(p)).abs() < 1e-12);
    }
}
