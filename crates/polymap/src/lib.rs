//! # polymap
//!
//! Geometry kernel and layered polygon map generation.
//!
//! A map is built from a regular polygon: its sides, nested inward copies
//! of those sides, connectors between neighbouring generations, spokes to
//! the origin, rings and marker circles. Every element is tagged with a
//! role so a renderer can style it.
//!
//! ```
//! use polymap::{Generator, GeneratorConfig};
//!
//! let generator = Generator::new(GeneratorConfig::default().with_sides(6)).unwrap();
//! let map = generator.generate();
//! assert_eq!(map.stats().outside_lines, 6);
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! Each file is a module that has to be declared here before anything can
//! see it. `pub use` lifts the types callers actually need to the crate
//! root, so `polymap::Generator` works without knowing where it lives.

pub mod elements;
pub mod generator;
pub mod geometry;
pub mod intersect;
pub mod map_info;
pub mod noise;
pub mod params;
pub mod rng;

pub use elements::{MapCircle, MapLine};
pub use generator::{Generator, GeneratorConfig};
pub use geometry::{Circle, GeometryError, Line, Point};
pub use intersect::{
    CircleIntersection, LineIntersection, intersect_circle_circle, intersect_line_circle,
    intersect_line_line,
};
pub use map_info::{MapInfo, MapStats};
pub use noise::Noise;
pub use params::{
    CircleParameterSet, CircleParameters, CircleRole, LineParameterSet, LineParameters, LineRole,
};
