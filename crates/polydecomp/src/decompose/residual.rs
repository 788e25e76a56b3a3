//! The residual polygon: what is left to decompose.

use crate::dcel::{FaceId, Graph, HalfEdgeId, VertexId};
use crate::geom2::{Point, Polygon};

/// Remaining boundary as a one-face graph plus its cyclic, index-aligned
/// vertex and half-edge sequences (`edges[k]` leaves `vertices[k]`).
///
/// Cloning gives an independent arena; each rotation attempt works on its own.
#[derive(Clone, Debug)]
pub struct Residual {
    graph: Graph,
    vertices: Vec<VertexId>,
    edges: Vec<HalfEdgeId>,
}

impl Residual {
    pub fn from_polygon(poly: &Polygon) -> Self {
        let graph = Graph::from_cycle(
            0,
            poly.vertices.iter().map(|v| (v.label.clone(), v.point)),
        );
        let n = graph.num_vertices();
        Self {
            graph,
            vertices: (0..n).map(VertexId).collect(),
            edges: (0..n).map(HalfEdgeId).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn labels(&self) -> Vec<&str> {
        self.vertices
            .iter()
            .map(|&v| self.graph.vertex(v).label.as_str())
            .collect()
    }

    pub fn points(&self) -> Vec<Point> {
        self.vertices.iter().map(|&v| self.graph.point(v)).collect()
    }

    /// Point at cyclic position `k` (any integer offset).
    #[inline]
    pub(crate) fn point_at(&self, k: isize) -> Point {
        let n = self.len() as isize;
        self.graph.point(self.vertices[k.rem_euclid(n) as usize])
    }

    pub(crate) fn label_at(&self, k: usize) -> &str {
        &self.graph.vertex(self.vertices[k]).label
    }

    pub(crate) fn clear(&mut self) {
        *self = Self {
            graph: Graph::default(),
            vertices: Vec::new(),
            edges: Vec::new(),
        };
    }

    /// Replace the run strictly between positions `first` and `last`
    /// (cyclic, walking forward from `first`) by a diagonal `first -> last`.
    ///
    /// Afterwards the sequences start at `last` and end at `first`.
    pub(crate) fn cut(&mut self, first: usize, last: usize) {
        let n = self.len();
        let g = &mut self.graph;
        let d = g.add_half_edge(self.vertices[first], FaceId(0));
        g.set_next(self.edges[(first + n - 1) % n], d);
        g.set_next(d, self.edges[last]);
        g.vertex_mut(self.vertices[first]).incident = d;
        g.face_mut(FaceId(0)).incident = d;

        let mut keep_vertex = vec![true; g.num_vertices()];
        let mut keep_edge = vec![true; g.num_half_edges()];
        let mut k = first;
        while k != last {
            keep_edge[self.edges[k].0] = false;
            if k != first {
                keep_vertex[self.vertices[k].0] = false;
            }
            k = (k + 1) % n;
        }
        self.graph = self.graph.compact(&keep_vertex, &keep_edge, &[FaceId(0)]);

        // The diagonal is the face's incident edge; the walk restarts after it.
        let d = self.graph.face(FaceId(0)).incident;
        let edges: Vec<HalfEdgeId> = self.graph.face_cycle(self.graph.next(d)).collect();
        self.vertices = edges.iter().map(|&e| self.graph.origin(e)).collect();
        self.edges = edges;
    }
}
