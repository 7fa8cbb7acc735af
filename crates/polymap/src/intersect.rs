//! Intersections between lines and circles.
//!
//! All three routines work on the implicit equations from
//! [`crate::geometry`]:
//! - line/line solves the 2x2 system with Cramer's rule
//! - line/circle substitutes the line into the circle and solves a quadratic
//! - circle/circle intersects along the radical line

use crate::geometry::{approx_zero, Circle, GeometryError, Line, Point, EPSILON};

/// Result of intersecting two lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineIntersection {
    /// Both lines are the same line.
    Equal,
    /// Distinct parallel lines, no common point.
    Parallel,
    /// The single crossing point.
    Point(Point),
}

/// Result of intersecting a circle with a line or another circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CircleIntersection {
    None,
    Tangent(Point),
    Secant(Point, Point),
    /// Only for two circles: same center, same radius.
    Coincident,
}

impl CircleIntersection {
    /// The intersection points, in solving order.
    pub fn points(&self) -> Vec<Point> {
        match *self {
            CircleIntersection::None | CircleIntersection::Coincident => Vec::new(),
            CircleIntersection::Tangent(p) => vec![p],
            CircleIntersection::Secant(p, q) => vec![p, q],
        }
    }
}

/// Intersect two (infinite) lines.
///
/// Coefficients are normalized first, so two different point pairs on the
/// same line are reported as [`LineIntersection::Equal`].
pub fn intersect_line_line(first: &Line, second: &Line) -> Result<LineIntersection, GeometryError> {
    let e1 = first.equation().normalized().ok_or(GeometryError::DegenerateLine)?;
    let e2 = second.equation().normalized().ok_or(GeometryError::DegenerateLine)?;

    let c_scale = e1.c.abs().max(e2.c.abs());
    if approx_zero(e1.a - e2.a, 1.0)
        && approx_zero(e1.b - e2.b, 1.0)
        && approx_zero(e1.c - e2.c, c_scale)
    {
        return Ok(LineIntersection::Equal);
    }

    // Normals are unit length, so det is the sine of the angle between the lines
    let det = e1.a * e2.b - e1.b * e2.a;
    if approx_zero(det, 1.0) {
        return Ok(LineIntersection::Parallel);
    }

    let x = (e2.c * e1.b - e1.c * e2.b) / det;
    let y = (e1.c * e2.a - e2.c * e1.a) / det;
    Ok(LineIntersection::Point(Point::new(x, y)))
}

/// Intersect an (infinite) line with a circle.
///
/// The line is solved for `y = f(x)` when it has that form and for a fixed
/// `x` when it is vertical; either way the circle turns into a quadratic.
pub fn intersect_line_circle(line: &Line, circle: &Circle) -> Result<CircleIntersection, GeometryError> {
    let (d, e, f) = circle.equation().expanded();
    let eq = line.equation().normalized().ok_or(GeometryError::DegenerateLine)?;
    let (a, b, c) = eq.coefficients();

    if !approx_zero(b, 0.0) {
        // y = (-c - a·x) / b
        let y_of = |x: f64| (-c - a * x) / b;
        let qa = a * a + b * b;
        let qb = b * b * d + 2.0 * a * c - a * b * e;
        let qc = c * c - b * c * e + b * b * f;

        Ok(solve_quadratic(qa, qb, qc, |x| Point::new(x, y_of(x))))
    } else {
        // Vertical: x = -c / a, quadratic in y
        let x = -c / a;
        let qc = x * x + d * x + f;

        Ok(solve_quadratic(1.0, e, qc, |y| Point::new(x, y)))
    }
}

/// Roots of `qa·t² + qb·t + qc`, mapped to points.
fn solve_quadratic<F>(qa: f64, qb: f64, qc: f64, to_point: F) -> CircleIntersection
where
    F: Fn(f64) -> Point,
{
    let discriminant = qb * qb - 4.0 * qa * qc;
    let scale = qb * qb + (4.0 * qa * qc).abs();

    if approx_zero(discriminant, scale) {
        return CircleIntersection::Tangent(to_point(-qb / (2.0 * qa)));
    }
    if discriminant < 0.0 {
        return CircleIntersection::None;
    }

    let root = discriminant.sqrt();
    CircleIntersection::Secant(
        to_point((-qb - root) / (2.0 * qa)),
        to_point((-qb + root) / (2.0 * qa)),
    )
}

/// Intersect two circles.
///
/// Concentric circles either coincide (equal radii) or never meet. Otherwise
/// the common chord lies on the radical line at distance
/// `(r1² - r2² + d²) / 2d` from the first center.
pub fn intersect_circle_circle(first: &Circle, second: &Circle) -> CircleIntersection {
    let delta = second.center.difference(first.center);
    let distance = delta.x.hypot(delta.y);
    let (r1, r2) = (first.radius, second.radius);
    let scale = r1.abs().max(r2.abs());

    if approx_zero(distance, scale) {
        return if approx_zero(r1 - r2, scale) {
            CircleIntersection::Coincident
        } else {
            CircleIntersection::None
        };
    }

    let tolerance = EPSILON * scale.max(distance).max(1.0);
    if distance > r1 + r2 + tolerance || distance < (r1 - r2).abs() - tolerance {
        return CircleIntersection::None;
    }

    let along = (r1 * r1 - r2 * r2 + distance * distance) / (2.0 * distance);
    let unit = delta.scale(1.0 / distance);
    let foot = first.center.add(unit.scale(along));

    let half_chord_sq = r1 * r1 - along * along;
    if approx_zero(half_chord_sq, r1 * r1) || half_chord_sq < 0.0 {
        return CircleIntersection::Tangent(foot);
    }

    let half_chord = half_chord_sq.sqrt();
    let normal = Point::new(-unit.y, unit.x);
    CircleIntersection::Secant(
        foot.add(normal.scale(half_chord)),
        foot.difference(normal.scale(half_chord)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
        Line::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn identical_lines_are_equal() {
        let a = line(0.0, 0.0, 1.0, 1.0);
        assert_eq!(intersect_line_line(&a, &a).unwrap(), LineIntersection::Equal);
        // Different points on the same line
        let b = line(2.0, 2.0, 5.0, 5.0);
        assert_eq!(intersect_line_line(&a, &b).unwrap(), LineIntersection::Equal);
        assert_eq!(intersect_line_line(&a, &b.reversed()).unwrap(), LineIntersection::Equal);
    }

    #[test]
    fn distinct_parallel_lines_do_not_meet() {
        let a = line(0.0, 0.0, 1.0, 1.0);
        let b = line(0.0, 1.0, 1.0, 2.0);
        assert_eq!(intersect_line_line(&a, &b).unwrap(), LineIntersection::Parallel);
    }

    #[test]
    fn diagonals_cross_at_origin() {
        let a = line(0.0, 0.0, 1.0, 1.0); // y = x
        let b = line(-1.0, 1.0, 1.0, -1.0); // y = -x
        match intersect_line_line(&a, &b).unwrap() {
            LineIntersection::Point(p) => assert!(p.approx_eq(Point::ORIGIN), "got {:?}", p),
            other => panic!("expected a point, got {:?}", other),
        }
    }

    #[test]
    fn skew_lines_cross() {
        let a = line(0.0, 1.0, 4.0, 1.0); // y = 1
        let b = line(2.0, -3.0, 2.0, 8.0); // x = 2
        match intersect_line_line(&a, &b).unwrap() {
            LineIntersection::Point(p) => assert!(p.approx_eq(Point::new(2.0, 1.0)), "got {:?}", p),
            other => panic!("expected a point, got {:?}", other),
        }
    }

    #[test]
    fn degenerate_line_cannot_intersect() {
        let p = Point::new(1.0, 1.0);
        let a = Line::new(p, p);
        let b = line(0.0, 0.0, 1.0, 0.0);
        assert_eq!(intersect_line_line(&a, &b), Err(GeometryError::DegenerateLine));
        let circle = Circle::new(Point::ORIGIN, 1.0);
        assert_eq!(intersect_line_circle(&a, &circle), Err(GeometryError::DegenerateLine));
    }

    #[test]
    fn line_misses_circle() {
        let circle = Circle::new(Point::ORIGIN, 1.0);
        let a = line(-5.0, 3.0, 5.0, 3.0);
        assert_eq!(intersect_line_circle(&a, &circle).unwrap(), CircleIntersection::None);
    }

    #[test]
    fn tangent_line_touches_once() {
        let circle = Circle::new(Point::ORIGIN, 1.0);
        let a = line(0.0, 1.0, 1.0, 1.0);
        match intersect_line_circle(&a, &circle).unwrap() {
            CircleIntersection::Tangent(p) => assert!(p.approx_eq(Point::new(0.0, 1.0)), "got {:?}", p),
            other => panic!("expected tangent, got {:?}", other),
        }
    }

    #[test]
    fn secant_line_crosses_twice() {
        let circle = Circle::new(Point::new(1.0, 1.0), 2.0);
        let a = line(-10.0, 1.0, 10.0, 1.0);
        let points = intersect_line_circle(&a, &circle).unwrap().points();
        assert_eq!(points.len(), 2);
        assert!(points[0].approx_eq(Point::new(-1.0, 1.0)), "got {:?}", points);
        assert!(points[1].approx_eq(Point::new(3.0, 1.0)), "got {:?}", points);
        for p in points {
            assert!(circle.is_point_on_boundary(p));
        }
    }

    #[test]
    fn vertical_line_uses_fallback() {
        let circle = Circle::new(Point::ORIGIN, 5.0);
        let a = line(3.0, -10.0, 3.0, 10.0);
        let points = intersect_line_circle(&a, &circle).unwrap().points();
        assert_eq!(points.len(), 2);
        assert!(points.iter().any(|p| p.approx_eq(Point::new(3.0, 4.0))), "got {:?}", points);
        assert!(points.iter().any(|p| p.approx_eq(Point::new(3.0, -4.0))), "got {:?}", points);
    }

    #[test]
    fn vertical_tangent() {
        let circle = Circle::new(Point::new(1.0, 0.0), 2.0);
        let a = line(3.0, 0.0, 3.0, 1.0);
        match intersect_line_circle(&a, &circle).unwrap() {
            CircleIntersection::Tangent(p) => assert!(p.approx_eq(Point::new(3.0, 0.0)), "got {:?}", p),
            other => panic!("expected tangent, got {:?}", other),
        }
    }

    #[test]
    fn circles_crossing() {
        let a = Circle::new(Point::ORIGIN, 5.0);
        let b = Circle::new(Point::new(8.0, 0.0), 5.0);
        let points = intersect_circle_circle(&a, &b).points();
        assert_eq!(points.len(), 2);
        assert!(points.iter().any(|p| p.approx_eq(Point::new(4.0, 3.0))), "got {:?}", points);
        assert!(points.iter().any(|p| p.approx_eq(Point::new(4.0, -3.0))), "got {:?}", points);
    }

    #[test]
    fn circles_touching_and_apart() {
        let a = Circle::new(Point::ORIGIN, 2.0);
        let touching = Circle::new(Point::new(5.0, 0.0), 3.0);
        match intersect_circle_circle(&a, &touching) {
            CircleIntersection::Tangent(p) => assert!(p.approx_eq(Point::new(2.0, 0.0)), "got {:?}", p),
            other => panic!("expected tangent, got {:?}", other),
        }

        let far = Circle::new(Point::new(10.0, 0.0), 3.0);
        assert_eq!(intersect_circle_circle(&a, &far), CircleIntersection::None);

        let nested = Circle::new(Point::new(0.5, 0.0), 0.5);
        assert_eq!(intersect_circle_circle(&a, &nested), CircleIntersection::None);
    }

    #[test]
    fn concentric_circles() {
        let a = Circle::new(Point::new(1.0, 1.0), 2.0);
        assert_eq!(intersect_circle_circle(&a, &a), CircleIntersection::Coincident);
        let b = a.with_radius(3.0);
        assert_eq!(intersect_circle_circle(&a, &b), CircleIntersection::None);
    }
}
