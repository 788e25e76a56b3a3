//! Folding a fresh partition into the accumulated decomposition.

use std::collections::HashMap;

use crate::dcel::{FaceId, Graph, HalfEdgeId, VertexId};
use crate::geom2::is_reflex;

/// What a merge did to the accumulated decomposition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The partition survives as a face of its own.
    pub face_added: bool,
    /// Shared diagonals removed because both resulting corners stay convex.
    pub elided: usize,
    /// Accumulated faces absorbed into another face through the partition.
    pub faces_fused: usize,
}

/// Merge `partition` into `accumulated`.
///
/// A missing side returns the other unchanged. Otherwise every accumulated
/// half-edge `u -> v` whose reverse `v -> u` bounds the partition marks a
/// shared diagonal. The diagonal is elided when neither corner it separates
/// becomes reflex, and kept as a twin pair otherwise. The partition's face
/// is kept only if nothing was elided.
pub fn merge(partition: Option<Graph>, accumulated: Option<Graph>) -> (Option<Graph>, MergeOutcome) {
    match (partition, accumulated) {
        (None, acc) => (acc, MergeOutcome::default()),
        (Some(p), None) => (
            Some(p),
            MergeOutcome {
                face_added: true,
                ..MergeOutcome::default()
            },
        ),
        (Some(p), Some(acc)) => {
            let (g, outcome) = Merger::new(acc).run(&p);
            (Some(g), outcome)
        }
    }
}

struct Merger {
    g: Graph,
    removed: Vec<bool>,
    outcome: MergeOutcome,
}

impl Merger {
    fn new(acc: Graph) -> Self {
        Self {
            removed: vec![false; acc.num_half_edges()],
            g: acc,
            outcome: MergeOutcome::default(),
        }
    }

    fn run(mut self, partition: &Graph) -> (Graph, MergeOutcome) {
        let acc_faces: Vec<FaceId> = self.g.face_ids().collect();
        let acc_edges = self.g.num_half_edges();
        let (part_face, lookup) = self.import(partition);
        self.removed.resize(self.g.num_half_edges(), false);

        for &f in &acc_faces {
            if !self.is_live(f) {
                continue;
            }
            // Buffered: the links change under the walk.
            let cycle: Vec<HalfEdgeId> = self.g.face_cycle(self.g.face(f).incident).collect();
            for e in cycle {
                if e.0 >= acc_edges || self.removed[e.0] {
                    continue;
                }
                let (u, v) = (self.g.origin(e), self.g.dest(e));
                if let Some(&pe) = lookup.get(&(v, u)) {
                    if !self.removed[pe.0] {
                        self.join(e, pe);
                    }
                }
            }
        }

        let mut faces: Vec<FaceId> = Vec::with_capacity(acc_faces.len() + 1);
        for &f in &acc_faces {
            if self.is_live(f) {
                faces.push(f);
            } else {
                self.outcome.faces_fused += 1;
            }
        }
        if self.is_live(part_face) {
            faces.push(part_face);
            self.outcome.face_added = true;
        }

        let keep_vertex = vec![true; self.g.num_vertices()];
        let keep_edge: Vec<bool> = self.removed.iter().map(|r| !r).collect();
        (self.g.compact(&keep_vertex, &keep_edge, &faces), self.outcome)
    }

    /// A face is live while its incident edge survives and still carries it.
    fn is_live(&self, f: FaceId) -> bool {
        let inc = self.g.face(f).incident;
        !self.removed[inc.0] && self.g.half_edge(inc).face == f
    }

    /// Copy the partition into the arena, reusing vertices by label.
    ///
    /// Returns the partition's face and a lookup `(origin, dest) -> half-edge`.
    fn import(&mut self, partition: &Graph) -> (FaceId, HashMap<(VertexId, VertexId), HalfEdgeId>) {
        let by_label: HashMap<String, VertexId> = self
            .g
            .vertices()
            .iter()
            .enumerate()
            .map(|(i, v)| (v.label.clone(), VertexId(i)))
            .collect();
        let edge_base = self.g.num_half_edges();
        let vmap: Vec<VertexId> = partition
            .vertices()
            .iter()
            .map(|v| match by_label.get(&v.label) {
                Some(&id) => id,
                None => self.g.add_vertex(
                    v.label.clone(),
                    v.point,
                    HalfEdgeId(edge_base + v.incident.0),
                ),
            })
            .collect();

        let mut face = FaceId(0);
        for (k, pf) in partition.faces().iter().enumerate() {
            let id = self
                .g
                .add_face(pf.label, HalfEdgeId(edge_base + pf.incident.0));
            if k == 0 {
                face = id;
            }
        }
        let face_base = face.0;
        for he in partition.half_edges() {
            let id = self
                .g
                .add_half_edge(vmap[he.origin.0], FaceId(face_base + he.face.0));
            let rec = self.g.half_edge_mut(id);
            rec.next = HalfEdgeId(edge_base + he.next.0);
            rec.prev = HalfEdgeId(edge_base + he.prev.0);
            rec.twin = he.twin.map(|t| HalfEdgeId(edge_base + t.0));
        }

        let lookup = (edge_base..self.g.num_half_edges())
            .map(HalfEdgeId)
            .map(|e| ((self.g.origin(e), self.g.dest(e)), e))
            .collect();
        (face, lookup)
    }

    /// Elide or twin the diagonal shared by accumulated `e` and partition `pe`.
    fn join(&mut self, e: HalfEdgeId, pe: HalfEdgeId) {
        let g = &self.g;
        let pt = |h: HalfEdgeId| g.point(g.origin(h));
        let f = g.half_edge(e).face;
        let separate = f != g.half_edge(pe).face;
        let convex_at_v = !is_reflex(pt(g.prev(pe)), pt(pe), pt(g.next(g.next(e))));
        let convex_at_u = !is_reflex(pt(g.prev(e)), pt(e), pt(g.next(g.next(pe))));
        if !(separate && convex_at_v && convex_at_u) {
            self.g.half_edge_mut(e).twin = Some(pe);
            self.g.half_edge_mut(pe).twin = Some(e);
            return;
        }

        let (e_next, e_prev) = (g.next(e), g.prev(e));
        let (pe_next, pe_prev) = (g.next(pe), g.prev(pe));
        let (u, v) = (g.origin(e), g.origin(pe));
        self.g.set_next(pe_prev, e_next);
        self.g.set_next(e_prev, pe_next);
        self.removed[e.0] = true;
        self.removed[pe.0] = true;
        self.outcome.elided += 1;

        if self.g.vertex(u).incident == e {
            self.g.vertex_mut(u).incident = pe_next;
        }
        if self.g.vertex(v).incident == pe {
            self.g.vertex_mut(v).incident = e_next;
        }
        let inc = self.g.face(f).incident;
        if inc == e || inc == pe {
            self.g.face_mut(f).incident = e_next;
        }
        // The fused cycle now belongs to `f`; whatever face the partition
        // side carried goes stale and is dropped at assembly.
        let cycle: Vec<HalfEdgeId> = self.g.face_cycle(e_next).collect();
        for h in cycle {
            self.g.half_edge_mut(h).face = f;
        }
    }
}
