//! Tagged map geometry: a kernel value plus a role and its resolved style.
//!
//! Style (thickness, and radius for circles) is looked up from the parameter
//! set once, when the element is created. Moving or scaling an element only
//! moves its position; style stays in map units and is scaled by whoever
//! draws it.

use crate::geometry::{Circle, Line, Point};
use crate::params::{CircleParameterSet, CircleRole, LineParameterSet, LineRole};

/// A line with a role and a stroke thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapLine {
    line: Line,
    role: LineRole,
    thickness: f64,
}

impl MapLine {
    pub fn new(start: Point, end: Point, role: LineRole, params: &LineParameterSet) -> Self {
        Self::from_line(Line::new(start, end), role, params)
    }

    pub fn from_line(line: Line, role: LineRole, params: &LineParameterSet) -> Self {
        Self { line, role, thickness: params.get(role).thickness }
    }

    #[inline]
    pub fn line(&self) -> &Line {
        &self.line
    }

    #[inline]
    pub fn role(&self) -> LineRole {
        self.role
    }

    #[inline]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.line.start()
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.line.end()
    }

    #[inline]
    pub fn boundaries(&self) -> (Point, Point) {
        self.line.boundaries()
    }

    pub fn translate(&self, vector: Point) -> Self {
        Self { line: self.line.translate(vector), ..*self }
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self { line: self.line.scale(factor), ..*self }
    }
}

/// A circle with a role, a radius and an outline thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCircle {
    circle: Circle,
    role: CircleRole,
    thickness: f64,
}

impl MapCircle {
    pub fn new(center: Point, role: CircleRole, params: &CircleParameterSet) -> Self {
        let style = params.get(role);
        Self {
            circle: Circle::new(center, style.radius),
            role,
            thickness: style.thickness,
        }
    }

    /// Same circle with its radius multiplied by `factor`.
    pub fn scaled_radius(&self, factor: f64) -> Self {
        Self {
            circle: self.circle.with_radius(self.circle.radius * factor),
            ..*self
        }
    }

    #[inline]
    pub fn circle(&self) -> &Circle {
        &self.circle
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.circle.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.circle.radius
    }

    #[inline]
    pub fn role(&self) -> CircleRole {
        self.role
    }

    /// Outline width; 0 means the circle is drawn filled.
    #[inline]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn bounding_box(&self) -> (Point, Point) {
        self.circle.bounding_box()
    }

    pub fn translate(&self, vector: Point) -> Self {
        Self { circle: self.circle.translate(vector), ..*self }
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            circle: Circle::new(self.circle.center.scale(factor), self.circle.radius),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_style_resolved_at_creation() {
        let mut params = LineParameterSet::default();
        params.inside.thickness = 2.5;
        let line = MapLine::new(Point::ORIGIN, Point::new(1.0, 0.0), LineRole::Inside, &params);
        assert_eq!(line.thickness(), 2.5);

        // Later changes to the parameter set do not reach existing elements
        params.inside.thickness = 9.0;
        assert_eq!(line.thickness(), 2.5);
    }

    #[test]
    fn sector_line_uses_connecting_style() {
        let params = LineParameterSet::default();
        let line = MapLine::new(Point::ORIGIN, Point::new(0.0, 1.0), LineRole::Sector, &params);
        assert_eq!(line.role(), LineRole::Sector);
        assert_eq!(line.thickness(), params.connecting.thickness);
    }

    #[test]
    fn transforms_return_new_values() {
        let params = LineParameterSet::default();
        let line = MapLine::new(Point::new(1.0, 1.0), Point::new(2.0, 3.0), LineRole::Outside, &params);
        let moved = line.translate(Point::new(1.0, -1.0));
        assert_eq!(moved.start(), Point::new(2.0, 0.0));
        assert_eq!(line.start(), Point::new(1.0, 1.0));

        let scaled = line.scale(2.0);
        assert_eq!(scaled.end(), Point::new(4.0, 6.0));
        assert_eq!(scaled.thickness(), line.thickness());
    }

    #[test]
    fn circle_scale_moves_center_only() {
        let params = CircleParameterSet::default();
        let circle = MapCircle::new(Point::new(1.0, 2.0), CircleRole::Outside, &params);
        let scaled = circle.scale(-3.0);
        assert_eq!(scaled.center(), Point::new(-3.0, -6.0));
        assert_eq!(scaled.radius(), params.outside.radius);
    }

    #[test]
    fn ring_radius_scaling() {
        let params = CircleParameterSet::default();
        let ring = MapCircle::new(Point::ORIGIN, CircleRole::Rings, &params).scaled_radius(3.0);
        assert_eq!(ring.radius(), params.rings.radius * 3.0);
        assert_eq!(ring.thickness(), params.rings.thickness);
    }
}
