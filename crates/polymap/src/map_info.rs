//! The generated map: every tagged line and circle, grouped by role.
//!
//! `MapInfo` is immutable once built. `translate` and `scale` return a new
//! aggregate, which keeps renderers free to transform a map for drawing
//! without touching the generator's copy.
//!
//! Iteration order is part of the contract:
//! - lines: outside, inside, central, connecting, sector
//! - circles: outside, rings, inside, connecting

use crate::elements::{MapCircle, MapLine};
use crate::geometry::Point;
use crate::params::{CircleRole, LineRole};

/// Element counts per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapStats {
    pub outside_lines: usize,
    pub inside_lines: usize,
    pub central_lines: usize,
    pub connecting_lines: usize,
    pub sector_lines: usize,
    pub outside_circles: usize,
    pub ring_circles: usize,
    pub inside_circles: usize,
    pub connecting_circles: usize,
}

impl MapStats {
    pub fn total_lines(&self) -> usize {
        self.outside_lines + self.inside_lines + self.central_lines + self.connecting_lines + self.sector_lines
    }

    pub fn total_circles(&self) -> usize {
        self.outside_circles + self.ring_circles + self.inside_circles + self.connecting_circles
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapInfo {
    outside_lines: Vec<MapLine>,
    inside_lines: Vec<MapLine>,
    central_lines: Vec<MapLine>,
    connecting_lines: Vec<MapLine>,
    sector_lines: Vec<MapLine>,
    outside_circles: Vec<MapCircle>,
    ring_circles: Vec<MapCircle>,
    inside_circles: Vec<MapCircle>,
    connecting_circles: Vec<MapCircle>,
}

impl MapInfo {
    /// Empty map; fill it with [`MapInfo::with_lines`] and [`MapInfo::with_circles`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the line collection for `role`.
    pub fn with_lines(mut self, role: LineRole, lines: Vec<MapLine>) -> Self {
        *self.lines_slot(role) = lines;
        self
    }

    /// Replace the circle collection for `role`.
    pub fn with_circles(mut self, role: CircleRole, circles: Vec<MapCircle>) -> Self {
        *self.circles_slot(role) = circles;
        self
    }

    fn lines_slot(&mut self, role: LineRole) -> &mut Vec<MapLine> {
        match role {
            LineRole::Outside => &mut self.outside_lines,
            LineRole::Inside => &mut self.inside_lines,
            LineRole::Central => &mut self.central_lines,
            LineRole::Connecting => &mut self.connecting_lines,
            LineRole::Sector => &mut self.sector_lines,
        }
    }

    fn circles_slot(&mut self, role: CircleRole) -> &mut Vec<MapCircle> {
        match role {
            CircleRole::Outside => &mut self.outside_circles,
            CircleRole::Rings => &mut self.ring_circles,
            CircleRole::Inside => &mut self.inside_circles,
            CircleRole::Connecting => &mut self.connecting_circles,
        }
    }

    pub fn lines_for(&self, role: LineRole) -> &[MapLine] {
        match role {
            LineRole::Outside => &self.outside_lines,
            LineRole::Inside => &self.inside_lines,
            LineRole::Central => &self.central_lines,
            LineRole::Connecting => &self.connecting_lines,
            LineRole::Sector => &self.sector_lines,
        }
    }

    pub fn circles_for(&self, role: CircleRole) -> &[MapCircle] {
        match role {
            CircleRole::Outside => &self.outside_circles,
            CircleRole::Rings => &self.ring_circles,
            CircleRole::Inside => &self.inside_circles,
            CircleRole::Connecting => &self.connecting_circles,
        }
    }

    /// Every line, in role order.
    pub fn lines(&self) -> impl Iterator<Item = &MapLine> + '_ {
        LineRole::all().iter().flat_map(move |role| self.lines_for(*role).iter())
    }

    /// Every circle, in role order.
    pub fn circles(&self) -> impl Iterator<Item = &MapCircle> + '_ {
        CircleRole::all().iter().flat_map(move |role| self.circles_for(*role).iter())
    }

    /// Outside-circle centers in order: the map's outline polygon.
    pub fn boundary(&self) -> Vec<Point> {
        self.outside_circles.iter().map(|c| c.center()).collect()
    }

    pub fn stats(&self) -> MapStats {
        MapStats {
            outside_lines: self.outside_lines.len(),
            inside_lines: self.inside_lines.len(),
            central_lines: self.central_lines.len(),
            connecting_lines: self.connecting_lines.len(),
            sector_lines: self.sector_lines.len(),
            outside_circles: self.outside_circles.len(),
            ring_circles: self.ring_circles.len(),
            inside_circles: self.inside_circles.len(),
            connecting_circles: self.connecting_circles.len(),
        }
    }

    /// Bounding box of all geometry, circle radii included, as `(min, max)`.
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        let line_points = self.lines().flat_map(|l| [l.start(), l.end()]);
        let circle_points = self.circles().flat_map(|c| {
            let (min, max) = c.bounding_box();
            [min, max]
        });

        line_points.chain(circle_points).fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((min, max)) => Some((
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )),
        })
    }

    /// New map with every element moved by `vector`.
    pub fn translate(&self, vector: Point) -> MapInfo {
        self.map_elements(|l| l.translate(vector), |c| c.translate(vector))
    }

    /// New map with every position multiplied by `factor`.
    ///
    /// A negative factor mirrors through the origin, which renderers use to
    /// flip the y axis into image coordinates.
    pub fn scale(&self, factor: f64) -> MapInfo {
        self.map_elements(|l| l.scale(factor), |c| c.scale(factor))
    }

    fn map_elements<L, C>(&self, line_fn: L, circle_fn: C) -> MapInfo
    where
        L: Fn(&MapLine) -> MapLine,
        C: Fn(&MapCircle) -> MapCircle,
    {
        let lines = |v: &[MapLine]| v.iter().map(&line_fn).collect::<Vec<_>>();
        let circles = |v: &[MapCircle]| v.iter().map(&circle_fn).collect::<Vec<_>>();

        MapInfo {
            outside_lines: lines(&self.outside_lines),
            inside_lines: lines(&self.inside_lines),
            central_lines: lines(&self.central_lines),
            connecting_lines: lines(&self.connecting_lines),
            sector_lines: lines(&self.sector_lines),
            outside_circles: circles(&self.outside_circles),
            ring_circles: circles(&self.ring_circles),
            inside_circles: circles(&self.inside_circles),
            connecting_circles: circles(&self.connecting_circles),
        }
    }
}
