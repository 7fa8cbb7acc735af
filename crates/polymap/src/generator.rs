//! Layered polygon map generation.
//!
//! A map is a regular polygon (the outside boundary) with `G` nested,
//! inward-shrinking copies of its sides (inside generations), connectors
//! bridging each generation to the next, optional sector spokes, rings
//! around the origin and marker circles on every inside endpoint.
//!
//! Everything is computed once in [`Generator::new`]; [`Generator::generate`]
//! only flattens the stored generations into a [`MapInfo`].
//!
//! Generation indices:
//! - `0` is the outside boundary
//! - `1..=G` are the inside generations
//! - `G + 1` is the origin, one point per side, where the taper ends

use std::f64::consts::PI;

use log::{debug, trace};

use crate::elements::{MapCircle, MapLine};
use crate::geometry::{approx_zero, round_to, GeometryError, Line, Point};
use crate::map_info::MapInfo;
use crate::noise::Noise;
use crate::params::{CircleParameterSet, CircleRole, LineParameterSet, LineRole};

pub const MIN_SIDES: usize = 3;
pub const MIN_GENERATIONS: usize = 1;

/// Decimal places kept on pivot point coordinates.
const PIVOT_PRECISION: i32 = 10;

/// Configuration for map generation.
///
/// Counts below their minimum are raised to it by [`Generator::new`]
/// rather than rejected.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub lines: LineParameterSet,
    pub circles: CircleParameterSet,
    /// Polygon side count (at least 3)
    pub side_count: usize,
    /// Number of inside generations (at least 1)
    pub generation_count: usize,
    /// Concentric rings around the origin
    pub rings_count: usize,
    /// Extra spokes per side inside each ring (0 = none)
    pub sector_subdivisions: usize,
    /// Multiplier on `inside.distance` for each generation's inward step
    pub noise_distance: Noise,
    /// Divisor on inside length, multiplier on ring radius
    pub noise_scale: Noise,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            lines: LineParameterSet::DEFAULT,
            circles: CircleParameterSet::DEFAULT,
            side_count: MIN_SIDES,
            generation_count: MIN_GENERATIONS,
            rings_count: 0,
            sector_subdivisions: 0,
            noise_distance: Noise::Identity,
            noise_scale: Noise::Identity,
        }
    }
}

impl GeneratorConfig {
    pub fn with_sides(mut self, side_count: usize) -> Self {
        self.side_count = side_count;
        self
    }

    pub fn with_generations(mut self, generation_count: usize) -> Self {
        self.generation_count = generation_count;
        self
    }

    pub fn with_rings(mut self, rings_count: usize) -> Self {
        self.rings_count = rings_count;
        self
    }

    pub fn with_sector_subdivisions(mut self, sector_subdivisions: usize) -> Self {
        self.sector_subdivisions = sector_subdivisions;
        self
    }

    pub fn with_lines(mut self, lines: LineParameterSet) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_circles(mut self, circles: CircleParameterSet) -> Self {
        self.circles = circles;
        self
    }

    pub fn with_noise_distance(mut self, noise: Noise) -> Self {
        self.noise_distance = noise;
        self
    }

    pub fn with_noise_scale(mut self, noise: Noise) -> Self {
        self.noise_scale = noise;
        self
    }

    /// Copy with every count raised to its minimum legal value.
    pub fn coerced(&self) -> GeneratorConfig {
        GeneratorConfig {
            side_count: self.side_count.max(MIN_SIDES),
            generation_count: self.generation_count.max(MIN_GENERATIONS),
            ..self.clone()
        }
    }
}

/// Where connectors attach on one side of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchors {
    /// Two points along the side's segment
    Segment(Point, Point),
    /// A single point (segment midpoint or the origin)
    Single(Point),
}

impl Anchors {
    pub fn points(&self) -> Vec<Point> {
        match *self {
            Anchors::Segment(a, b) => vec![a, b],
            Anchors::Single(p) => vec![p],
        }
    }
}

/// Map generator with its memoized per-generation geometry.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    pivot_points: Vec<Point>,
    outside_lines: Vec<MapLine>,
    /// Index `g - 1` holds generation `g`
    inside_lines: Vec<Vec<MapLine>>,
    central_lines: Vec<MapLine>,
    /// Index `g` holds the connectors from generation `g` to `g + 1`
    connecting_lines: Vec<Vec<MapLine>>,
    /// Index `g` holds the spokes between generation `g` and `g + 1`
    sector_lines: Vec<Vec<MapLine>>,
    outside_circles: Vec<MapCircle>,
    inside_circle: MapCircle,
    /// Innermost first
    ring_circles: Vec<MapCircle>,
    /// Index `g - 1` holds the markers of generation `g`
    connecting_circles: Vec<Vec<MapCircle>>,
}

impl Generator {
    /// Build every generation of the map.
    ///
    /// Fails with a [`GeometryError`] when the parameters describe
    /// degenerate geometry: a non-positive side length, a generation pushed
    /// through the origin, or a noise value that would divide by zero.
    pub fn new(config: GeneratorConfig) -> Result<Self, GeometryError> {
        let config = config.coerced();
        let generations = config.generation_count;

        let pivot_points = pivot_points(&config)?;
        let outside_lines = outside_lines(&pivot_points, &config.lines);

        let mut inside_lines: Vec<Vec<MapLine>> = Vec::with_capacity(generations);
        for generation in 1..=generations {
            let next = {
                let previous = if generation == 1 {
                    &outside_lines
                } else {
                    &inside_lines[generation - 2]
                };
                inside_generation(previous, generation, &config)?
            };
            inside_lines.push(next);
        }

        let central_lines = pivot_points
            .iter()
            .map(|&p| MapLine::new(p, Point::ORIGIN, LineRole::Central, &config.lines))
            .collect();

        let outside_circles = pivot_points
            .iter()
            .map(|&p| MapCircle::new(p, CircleRole::Outside, &config.circles))
            .collect();

        let mut generator = Self {
            inside_circle: MapCircle::new(Point::ORIGIN, CircleRole::Inside, &config.circles),
            ring_circles: ring_circles(&config)?,
            config,
            pivot_points,
            outside_lines,
            inside_lines,
            central_lines,
            connecting_lines: Vec::new(),
            sector_lines: Vec::new(),
            outside_circles,
            connecting_circles: Vec::new(),
        };

        generator.connecting_lines = (0..=generations)
            .map(|g| generator.connecting_generation_lines(g))
            .collect::<Result<_, _>>()?;

        generator.sector_lines = if generator.config.sector_subdivisions > 0 {
            (0..generations)
                .map(|g| generator.sector_generation_lines(g))
                .collect::<Result<_, _>>()?
        } else {
            vec![Vec::new(); generations]
        };

        generator.connecting_circles = (1..=generations)
            .map(|g| generator.connecting_generation_circles(g))
            .collect();

        debug!(
            "generated map: {} sides, {} generations, {} rings, {} sector subdivisions",
            generator.config.side_count,
            generations,
            generator.config.rings_count,
            generator.config.sector_subdivisions
        );

        Ok(generator)
    }

    /// The configuration actually used, counts already coerced.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Polygon vertices, counter-clockwise from the positive y axis.
    pub fn pivot_points(&self) -> &[Point] {
        &self.pivot_points
    }

    pub fn outside_lines(&self) -> &[MapLine] {
        &self.outside_lines
    }

    pub fn central_lines(&self) -> &[MapLine] {
        &self.central_lines
    }

    /// Inside lines of generation `g` (`1..=G`).
    pub fn inside_generation(&self, generation: usize) -> Option<&[MapLine]> {
        generation
            .checked_sub(1)
            .and_then(|i| self.inside_lines.get(i))
            .map(Vec::as_slice)
    }

    /// Connectors from generation `g` to `g + 1` (`0..=G`).
    pub fn connecting_generation(&self, generation: usize) -> Option<&[MapLine]> {
        self.connecting_lines.get(generation).map(Vec::as_slice)
    }

    /// Sector spokes between generation `g` and `g + 1` (`0..G`).
    pub fn sector_generation(&self, generation: usize) -> Option<&[MapLine]> {
        self.sector_lines.get(generation).map(Vec::as_slice)
    }

    /// Marker circles of generation `g` (`1..=G`).
    pub fn connecting_circle_generation(&self, generation: usize) -> Option<&[MapCircle]> {
        generation
            .checked_sub(1)
            .and_then(|i| self.connecting_circles.get(i))
            .map(Vec::as_slice)
    }

    /// Flatten every generation into one map.
    pub fn generate(&self) -> MapInfo {
        // Rings are stored innermost first; the map lists them outer to inner
        let rings = self.ring_circles.iter().rev().copied().collect();

        MapInfo::new()
            .with_lines(LineRole::Outside, self.outside_lines.clone())
            .with_lines(LineRole::Inside, flatten_lines(&self.inside_lines))
            .with_lines(LineRole::Central, self.central_lines.clone())
            .with_lines(LineRole::Connecting, flatten_lines(&self.connecting_lines))
            .with_lines(LineRole::Sector, flatten_lines(&self.sector_lines))
            .with_circles(CircleRole::Outside, self.outside_circles.clone())
            .with_circles(CircleRole::Rings, rings)
            .with_circles(CircleRole::Inside, vec![self.inside_circle])
            .with_circles(
                CircleRole::Connecting,
                self.connecting_circles.iter().flatten().copied().collect(),
            )
    }

    /// Boundary segments of generation `g` (`0..=G`).
    fn boundary_lines(&self, generation: usize) -> &[MapLine] {
        if generation == 0 {
            &self.outside_lines
        } else {
            &self.inside_lines[generation - 1]
        }
    }

    /// Connector start points on generation `g` (`0..=G`), one entry per side.
    ///
    /// Two points inset from the segment ends while an inner generation
    /// follows; the segment midpoint on the last generation.
    fn outer_anchors(&self, generation: usize) -> Result<Vec<Anchors>, GeometryError> {
        let mut inset = self.config.lines.connecting.distance;
        if generation == 0 {
            inset += self.config.circles.outside.radius;
        }
        let last = generation == self.config.generation_count;

        self.boundary_lines(generation)
            .iter()
            .map(|line| {
                if last {
                    Ok(Anchors::Single(line.line().midpoint()))
                } else {
                    let (a, b) = line.line().points_by_distance(inset)?;
                    Ok(Anchors::Segment(a, b))
                }
            })
            .collect()
    }

    /// Connector end points on generation `g` (`1..=G + 1`), one entry per side.
    fn inner_anchors(&self, generation: usize) -> Vec<Anchors> {
        if generation > self.config.generation_count {
            return vec![Anchors::Single(Point::ORIGIN); self.config.side_count];
        }
        self.boundary_lines(generation)
            .iter()
            .map(|line| {
                let (a, b) = line.boundaries();
                Anchors::Segment(a, b)
            })
            .collect()
    }

    fn connecting_generation_lines(&self, generation: usize) -> Result<Vec<MapLine>, GeometryError> {
        let outer = self.outer_anchors(generation)?;
        let inner = self.inner_anchors(generation + 1);

        let lines: Vec<MapLine> = outer
            .iter()
            .zip(&inner)
            .flat_map(|(o, i)| pair_anchors(*o, *i))
            .map(|(from, to)| MapLine::new(from, to, LineRole::Connecting, &self.config.lines))
            .collect();

        trace!("generation {}: {} connecting lines", generation, lines.len());
        Ok(lines)
    }

    fn sector_generation_lines(&self, generation: usize) -> Result<Vec<MapLine>, GeometryError> {
        let subdivisions = self.config.sector_subdivisions;
        let outer = self.outer_anchors(generation)?;
        let inner = self.inner_anchors(generation + 1);

        let mut lines = Vec::new();
        for (o, i) in outer.iter().zip(&inner) {
            let (Anchors::Segment(oa, ob), Anchors::Segment(ia, ib)) = (*o, *i) else {
                continue;
            };
            let outer_line = Line::new(oa, ob);
            let inner_line = aligned(&outer_line, Line::new(ia, ib));

            let spokes = outer_line
                .subdivision_points(subdivisions)
                .into_iter()
                .zip(inner_line.subdivision_points(subdivisions));
            for (from, to) in spokes {
                lines.push(MapLine::new(from, to, LineRole::Sector, &self.config.lines));
            }
        }

        trace!("generation {}: {} sector lines", generation, lines.len());
        Ok(lines)
    }

    fn connecting_generation_circles(&self, generation: usize) -> Vec<MapCircle> {
        self.inner_anchors(generation)
            .iter()
            .flat_map(Anchors::points)
            .map(|p| MapCircle::new(p, CircleRole::Connecting, &self.config.circles))
            .collect()
    }
}

fn flatten_lines(generations: &[Vec<MapLine>]) -> Vec<MapLine> {
    generations.iter().flatten().copied().collect()
}

/// Turn `inner` around if it runs against `outer`, so paired endpoints don't cross.
fn aligned(outer: &Line, inner: Line) -> Line {
    if outer.is_same_direction(&inner) {
        inner
    } else {
        inner.reversed()
    }
}

/// Match outer anchors to inner anchors positionally.
fn pair_anchors(outer: Anchors, inner: Anchors) -> Vec<(Point, Point)> {
    match (outer, inner) {
        (Anchors::Segment(oa, ob), Anchors::Segment(ia, ib)) => {
            let inner_line = aligned(&Line::new(oa, ob), Line::new(ia, ib));
            vec![(oa, inner_line.start()), (ob, inner_line.end())]
        }
        (Anchors::Segment(oa, ob), Anchors::Single(p)) => vec![(oa, p), (ob, p)],
        (Anchors::Single(p), Anchors::Segment(ia, ib)) => {
            vec![(p, Line::new(ia, ib).midpoint())]
        }
        (Anchors::Single(p), Anchors::Single(q)) => vec![(p, q)],
    }
}

/// Polygon vertices on a circle of radius `(L/2 + r) / sin(π/n)`.
fn pivot_points(config: &GeneratorConfig) -> Result<Vec<Point>, GeometryError> {
    let n = config.side_count;
    let half_side = config.lines.outside.length / 2.0 + config.circles.outside.radius;
    if half_side <= 0.0 || !half_side.is_finite() {
        return Err(GeometryError::ZeroSideLength { side_length: 2.0 * half_side });
    }

    let step = 2.0 * PI / n as f64;
    let radius = half_side / (step / 2.0).sin();
    debug!("pivot radius {:.4} for {} sides", radius, n);

    Ok((0..n)
        .map(|k| {
            let theta = k as f64 * step;
            // k = 0 sits on the positive y axis, later points run counter-clockwise
            Point::new(
                round_to(-radius * theta.sin(), PIVOT_PRECISION),
                round_to(radius * theta.cos(), PIVOT_PRECISION),
            )
        })
        .collect())
}

fn outside_lines(pivots: &[Point], params: &LineParameterSet) -> Vec<MapLine> {
    pivots
        .iter()
        .enumerate()
        .map(|(i, &p)| MapLine::new(p, pivots[(i + 1) % pivots.len()], LineRole::Outside, params))
        .collect()
}

/// One inside generation built from the generation before it.
fn inside_generation(
    previous: &[MapLine],
    generation: usize,
    config: &GeneratorConfig,
) -> Result<Vec<MapLine>, GeometryError> {
    let inside = &config.lines.inside;
    let step = checked_noise(&config.noise_distance, generation, false)? * inside.distance;
    let scale = checked_noise(&config.noise_scale, generation, true)?;
    let half_length = inside.length / (2.0 * scale);

    let lines = previous
        .iter()
        .enumerate()
        .map(|(side, source)| {
            let center = source.line().midpoint();
            let distance = center.distance_to_origin();
            if approx_zero(distance, 0.0) {
                return Err(GeometryError::DegenerateLine);
            }

            let factor = (distance - step) / distance;
            if factor <= 0.0 || approx_zero(factor, 0.0) {
                return Err(GeometryError::CollapsedGeneration { generation, side });
            }

            let line = source.line().parallel_through(center.scale(factor), half_length);
            Ok(MapLine::from_line(line, LineRole::Inside, &config.lines))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "generation {}: {} inside lines, step {:.4}, half length {:.4}",
        generation,
        lines.len(),
        step,
        half_length
    );
    Ok(lines)
}

/// Rings around the origin, innermost first.
fn ring_circles(config: &GeneratorConfig) -> Result<Vec<MapCircle>, GeometryError> {
    let base = MapCircle::new(Point::ORIGIN, CircleRole::Rings, &config.circles);
    (1..=config.rings_count)
        .map(|k| Ok(base.scaled_radius(checked_noise(&config.noise_scale, k, true)?)))
        .collect()
}

/// Evaluate `noise`, rejecting values the generator can't use.
fn checked_noise(noise: &Noise, generation: usize, positive: bool) -> Result<f64, GeometryError> {
    let value = noise.eval(generation);
    if !value.is_finite() || (positive && (value <= 0.0 || approx_zero(value, 0.0))) {
        return Err(GeometryError::InvalidNoise { generation, value });
    }
    Ok(value)
}
