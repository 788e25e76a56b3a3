//! Handles and node records of the half-edge arena.
//!
//! Handles are plain indices into one `Graph`; they mean nothing in another.

use crate::geom2::Point;

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdgeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub usize);

/// Labeled vertex with one outgoing half-edge.
///
/// `incident` is navigational only and is refreshed whenever the edge it
/// names is removed.
#[derive(Clone, Debug)]
pub struct Vertex {
    pub label: String,
    pub point: Point,
    pub incident: HalfEdgeId,
}

/// Directed half-edge; the face it bounds lies on its walking side.
#[derive(Clone, Debug)]
pub struct HalfEdge {
    pub origin: VertexId,
    pub face: FaceId,
    pub next: HalfEdgeId,
    pub prev: HalfEdgeId,
    /// Set only for internal diagonals kept between two faces.
    pub twin: Option<HalfEdgeId>,
}

/// Face numbered by the partition that created it.
#[derive(Clone, Debug)]
pub struct Face {
    pub label: usize,
    pub incident: HalfEdgeId,
}
