//! Exact 2D geometry for polygon decomposition.
//!
//! Purpose
//! - Stateless predicates (orientation, segment crossing, ray casting,
//!   reflex test) shared by the extractor and the merger.
//! - The labeled input `Polygon` and a seeded star-polygon sampler.
//!
//! Numerics
//! - No epsilons. Degeneracies (collinear triples, query points on a side)
//!   go through explicit `Orientation::Collinear` branches.

mod polygon;
mod predicates;
pub mod rand;
mod types;

pub use polygon::{Polygon, PolygonVertex};
pub use predicates::{
    is_reflex, on_segment, orientation, point_in_polygon, segments_intersect,
    segments_intersect3, Crossing, Location,
};
pub use types::{Bounds2, Orientation, Point, Segment};
