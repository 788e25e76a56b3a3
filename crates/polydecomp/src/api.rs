//! Curated surface for the CLI and benches (unstable).
//!
//! Prefer these re-exports over deep paths so callers stay readable when the
//! module layout moves.

// Geometry
pub use crate::geom2::{
    is_reflex, orientation, point_in_polygon, Bounds2, Location, Orientation, Point, Polygon,
    PolygonVertex,
};
// Random polygons
pub use crate::geom2::rand::{
    draw_star_polygon, ReplayToken as StarReplay, StarCfg, VertexCount,
};
// Half-edge graph
pub use crate::dcel::{Adjacency, Face, FaceId, Graph, HalfEdge, HalfEdgeId, Vertex, VertexId};
// Decomposition
pub use crate::decompose::{
    decompose, decompose_from, decompose_with, extract, merge, Decomposition, Extraction,
    MergeOutcome, NoopObserver, Residual, SearchCfg, SearchObserver, SearchResult,
};
// Text formats
pub use crate::io::{read_polygon, write_polygon, write_visualisation};
