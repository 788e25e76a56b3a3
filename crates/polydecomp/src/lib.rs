//! Convex decomposition of simple polygons without Steiner points.
//!
//! A clockwise, labeled polygon is split into convex faces held in a
//! half-edge graph. Faces are grown greedily from a start vertex, shrunk
//! while a reflex vertex would be swallowed, and merged back where a
//! diagonal turns out unnecessary. Every starting offset is tried and the
//! decompositions with the fewest faces are kept.
//!
//! Layout
//! - `geom2`: predicates, the input `Polygon`, and a seeded polygon sampler.
//! - `dcel`: the half-edge arena `Graph`.
//! - `decompose`: extractor, merger, and the rotation search.
//! - `io`: text input and visualiser formats.
//!
//! API Policy
//! - Project-internal; breaking changes are fine when they improve the design.

pub mod api;
pub mod dcel;
pub mod decompose;
pub mod error;
pub mod geom2;
pub mod io;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use decompose::{decompose, decompose_with, SearchCfg, SearchResult};
pub use error::{DcelError, DecomposeError, ParseError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::dcel::{Adjacency, FaceId, Graph, HalfEdgeId, VertexId};
    pub use crate::decompose::{
        decompose, decompose_from, decompose_with, Decomposition, NoopObserver, SearchCfg,
        SearchObserver, SearchResult,
    };
    pub use crate::geom2::rand::{draw_star_polygon, ReplayToken, StarCfg, VertexCount};
    pub use crate::geom2::{Point, Polygon, PolygonVertex};
}
