//! Convex decomposition: extractor, merger, and rotation search.
//!
//! Purpose
//! - Split a simple clockwise polygon into convex faces using only its own
//!   vertices, aiming for the fewest faces.
//!
//! Model
//! - `Residual`: the part of the polygon not yet covered, one face.
//! - `extract`: grow one convex face from a start position greedily, then
//!   shrink it while a reflex residual vertex sits inside; cut it off.
//! - `merge`: fold the face into the running decomposition, removing shared
//!   diagonals whose removal keeps both corners convex.
//! - `decompose_with`: repeat extract+merge from every starting offset on a
//!   fresh residual and keep the face-count minimum (ties retained).
//!
//! Cost
//! - O(n²) per extraction, O(n³) per offset, O(n⁴) for the full search.
//!
//! References
//! - J. Fernández, L. Cánovas, B. Pelegrín, "Algorithms for the decomposition
//!   of a polygon into convex polygons", EJOR 121 (2000). Procedure MP1 plus
//!   the merging step for non-essential diagonals.

mod extract;
mod merge;
mod residual;
mod search;

pub use extract::{extract, Extraction};
pub use merge::{merge, MergeOutcome};
pub use residual::Residual;
pub use search::{
    decompose, decompose_from, decompose_with, Decomposition, NoopObserver, SearchCfg,
    SearchObserver, SearchResult,
};

#[cfg(test)]
mod tests;
