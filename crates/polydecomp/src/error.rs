//! Error types of the library.

use thiserror::Error;

use crate::dcel::{FaceId, HalfEdgeId, VertexId};

/// A broken half-edge invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DcelError {
    #[error("handle out of range: {what} {index}")]
    DanglingHandle { what: &'static str, index: usize },
    #[error("next/prev are not inverse at half-edge {0:?}")]
    BrokenLink(HalfEdgeId),
    #[error("twin of {0:?} does not point back or does not mirror its segment")]
    BrokenTwin(HalfEdgeId),
    #[error("incident edge of vertex {0:?} does not originate there")]
    VertexIncidence(VertexId),
    #[error("incident edge of face {0:?} is not on its boundary cycle")]
    FaceIncidence(FaceId),
    #[error("boundary of face {face:?} does not close after {limit} steps")]
    OpenCycle { face: FaceId, limit: usize },
}

/// Failure of a full decomposition search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecomposeError {
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
    #[error("no rotation produced a complete decomposition ({offsets_tried} offsets tried)")]
    NoDecomposition { offsets_tried: usize },
}

/// Failure reading the text polygon format.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("empty input: expected a vertex count on the first line")]
    MissingHeader,
    #[error("invalid vertex count {0:?}")]
    InvalidHeader(String),
    #[error("line {line}: expected `<id> <x> <y>`, got {content:?}")]
    InvalidVertex { line: usize, content: String },
    #[error("expected {expected} vertices, found {found}")]
    CountMismatch { expected: usize, found: usize },
    #[error("read failed")]
    Io(#[from] std::io::Error),
}
