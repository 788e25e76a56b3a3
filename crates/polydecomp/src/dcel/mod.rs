//! Half-edge planar graph (DCEL) over an index arena.
//!
//! Purpose
//! - Represent the input polygon, each extracted partition, the residual
//!   polygon, and the accumulated decomposition with one node layout.
//!
//! Model
//! - A `Graph` owns its vertices, half-edges and faces in `Vec`s; handles
//!   are indices into that one arena. Copies between graphs are deep and
//!   remap handles; no node is shared by two arenas.
//! - Boundary cycles are closed by `next`/`prev`. `twin` is set only for
//!   diagonals kept between two faces; polygon boundary edges have none.
//! - Surgery (splicing, compaction) is `pub(crate)` and performed by the
//!   extractor and the merger; the public API is read-only.
//!
//! References
//! - de Berg, van Kreveld, Overmars, Schwarzkopf, "Computational Geometry",
//!   ch. 2.2 (doubly-connected edge lists).

mod graph;
mod types;

pub use graph::{Adjacency, FaceCycle, Graph};
pub use types::{Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId};
