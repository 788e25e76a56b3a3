//! Search over starting offsets for a decomposition with the fewest faces.

use tracing::{debug, info, warn};

use crate::dcel::Graph;
use crate::error::DecomposeError;
use crate::geom2::Polygon;

use super::extract::{extract, Extraction};
use super::merge::{merge, MergeOutcome};
use super::residual::Residual;

/// Search knobs.
#[derive(Clone, Copy, Debug)]
pub struct SearchCfg {
    /// Skip an offset whose first partition repeats the first partition of
    /// the last fully explored offset. Not proven to preserve minimality.
    pub dedup_rotations: bool,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            dedup_rotations: true,
        }
    }
}

/// Hooks into the search; every method defaults to doing nothing.
pub trait SearchObserver {
    fn attempt_started(&mut self, _offset: usize, _residual: &Residual) {}
    fn partition_extracted(&mut self, _number: usize, _partition: &Graph) {}
    fn decomposition_merged(&mut self, _decomposition: &Graph, _outcome: MergeOutcome) {}
    fn first_partition_probed(&mut self, _offset: usize, _partition: Option<&Graph>) {}
    fn rotation_skipped(&mut self, _offset: usize) {}
    /// `faces` is `None` when the attempt stalled before consuming the polygon.
    fn attempt_finished(&mut self, _offset: usize, _faces: Option<usize>) {}
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// One complete decomposition and the offset that produced it.
#[derive(Clone, Debug)]
pub struct Decomposition {
    pub graph: Graph,
    pub faces: usize,
    pub offset: usize,
}

/// All minimum-count decompositions plus bookkeeping of the search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Ties in offset order; never empty.
    pub minimal: Vec<Decomposition>,
    pub min_faces: usize,
    /// Offsets run to completion or to a stall.
    pub explored: Vec<usize>,
    /// Offsets skipped by the rotation dedup.
    pub skipped: Vec<usize>,
}

impl SearchResult {
    /// The reported answer: the first minimal decomposition found.
    pub fn best(&self) -> &Decomposition {
        &self.minimal[0]
    }
}

/// Minimal decomposition with default settings and no observer.
pub fn decompose(polygon: &Polygon) -> Result<SearchResult, DecomposeError> {
    decompose_with(polygon, SearchCfg::default(), &mut NoopObserver)
}

/// Try every starting offset and keep the decompositions with fewest faces.
pub fn decompose_with<O: SearchObserver>(
    polygon: &Polygon,
    cfg: SearchCfg,
    observer: &mut O,
) -> Result<SearchResult, DecomposeError> {
    if polygon.len() < 3 {
        return Err(DecomposeError::TooFewVertices {
            count: polygon.len(),
        });
    }
    RotationSearch::new(polygon, cfg, observer).solve()
}

/// Run the extract-and-merge loop from one fixed offset.
///
/// Returns `None` if the attempt stalled with vertices left.
pub fn decompose_from<O: SearchObserver>(
    polygon: &Polygon,
    offset: usize,
    observer: &mut O,
) -> Option<Decomposition> {
    RotationSearch::new(polygon, SearchCfg::default(), observer)
        .attempt(offset)
        .decomposition
}

struct Attempt {
    decomposition: Option<Decomposition>,
    first: Option<Graph>,
}

/// Runner carrying the pristine residual, the observer and the incumbents.
struct RotationSearch<'a, O> {
    base: Residual,
    cfg: SearchCfg,
    observer: &'a mut O,
    minimal: Vec<Decomposition>,
    min_faces: usize,
    explored: Vec<usize>,
    skipped: Vec<usize>,
}

impl<'a, O: SearchObserver> RotationSearch<'a, O> {
    fn new(polygon: &Polygon, cfg: SearchCfg, observer: &'a mut O) -> Self {
        Self {
            base: Residual::from_polygon(polygon),
            cfg,
            observer,
            minimal: Vec::new(),
            min_faces: usize::MAX,
            explored: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn solve(mut self) -> Result<SearchResult, DecomposeError> {
        let n = self.base.len();
        let mut reference: Option<Graph> = None;
        for s in 0..n {
            if self.cfg.dedup_rotations && s > 0 {
                let probe = self.probe_first(s);
                self.observer.first_partition_probed(s, probe.as_ref());
                if same_cycle(probe.as_ref(), reference.as_ref()) {
                    debug!(offset = s, "rotation skipped: first partition repeats");
                    self.observer.rotation_skipped(s);
                    self.skipped.push(s);
                    continue;
                }
            }
            let attempt = self.attempt(s);
            self.explored.push(s);
            reference = attempt.first;
            if let Some(d) = attempt.decomposition {
                if d.faces < self.min_faces {
                    self.min_faces = d.faces;
                    self.minimal.clear();
                    self.minimal.push(d);
                } else if d.faces == self.min_faces {
                    self.minimal.push(d);
                }
            }
        }

        if self.minimal.is_empty() {
            return Err(DecomposeError::NoDecomposition {
                offsets_tried: self.explored.len(),
            });
        }
        info!(
            vertices = n,
            min_faces = self.min_faces,
            ties = self.minimal.len(),
            explored = self.explored.len(),
            skipped = self.skipped.len(),
            "decomposition search finished"
        );
        Ok(SearchResult {
            minimal: self.minimal,
            min_faces: self.min_faces,
            explored: self.explored,
            skipped: self.skipped,
        })
    }

    /// Consume a fresh copy of the polygon starting at offset `s`.
    fn attempt(&mut self, s: usize) -> Attempt {
        let mut residual = self.base.clone();
        self.observer.attempt_started(s, &residual);
        let mut acc: Option<Graph> = None;
        let mut first: Option<Graph> = None;
        while !residual.is_empty() {
            let number = acc.as_ref().map_or(0, Graph::num_faces) + 1;
            let Some(partition) = extract_from(&mut residual, s, number) else {
                break;
            };
            self.observer.partition_extracted(number, &partition);
            if first.is_none() {
                first = Some(partition.clone());
            }
            let (merged, outcome) = merge(Some(partition), acc.take());
            if let Some(g) = &merged {
                self.observer.decomposition_merged(g, outcome);
            }
            acc = merged;
        }

        let decomposition = match acc {
            Some(graph) if residual.is_empty() => {
                let faces = graph.num_faces();
                debug!(offset = s, faces, "rotation complete");
                Some(Decomposition {
                    graph,
                    faces,
                    offset: s,
                })
            }
            _ => {
                warn!(
                    offset = s,
                    remaining = residual.len(),
                    "rotation stalled: every start is blocked"
                );
                None
            }
        };
        self.observer
            .attempt_finished(s, decomposition.as_ref().map(|d| d.faces));
        Attempt {
            decomposition,
            first,
        }
    }

    /// First partition offset `s` would extract, on a throwaway copy.
    fn probe_first(&self, s: usize) -> Option<Graph> {
        let mut residual = self.base.clone();
        extract_from(&mut residual, s, 1)
    }
}

/// Try each start `s, s+1, ...` once around the residual until one succeeds.
fn extract_from(residual: &mut Residual, s: usize, number: usize) -> Option<Graph> {
    let len = residual.len();
    for i in s..len + s {
        match extract(residual, i, number) {
            Extraction::Partition(g) => return Some(g),
            Extraction::Exhausted => return None,
            Extraction::Blocked => {}
        }
    }
    None
}

/// Same cyclic label sequence on the (single) first face of both graphs.
fn same_cycle(a: Option<&Graph>, b: Option<&Graph>) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };
    let (Some(fa), Some(fb)) = (a.face_ids().next(), b.face_ids().next()) else {
        return false;
    };
    let (la, lb) = (a.face_labels(fa), b.face_labels(fb));
    let n = la.len();
    n == lb.len() && (0..n).any(|r| (0..n).all(|k| la[(k + r) % n] == lb[k]))
}
