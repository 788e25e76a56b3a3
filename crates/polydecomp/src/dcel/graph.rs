//! The half-edge arena and its read API.
//!
//! All nodes live in flat `Vec`s addressed by `VertexId`, `HalfEdgeId`,
//! `FaceId`. Structural edits are crate-internal: the extractor and the
//! merger perform their own surgery and then `compact` the arena, which
//! drops removed nodes and remaps every handle.

use nalgebra::DMatrix;

use super::types::{Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId};
use crate::error::DcelError;
use crate::geom2::{Point, Polygon};

/// Owning vertex/half-edge/face container.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    half_edges: Vec<HalfEdge>,
    faces: Vec<Face>,
}

impl Graph {
    /// Assemble from raw records and verify every invariant.
    pub fn from_parts(
        vertices: Vec<Vertex>,
        half_edges: Vec<HalfEdge>,
        faces: Vec<Face>,
    ) -> Result<Self, DcelError> {
        let g = Self {
            vertices,
            half_edges,
            faces,
        };
        g.check_invariants()?;
        Ok(g)
    }

    /// One-face graph whose boundary walks `items` in order (closing edge implied).
    ///
    /// Half-edge `k` leaves vertex `k`; the face's incident edge is edge 0.
    pub fn from_cycle<I, S>(label: usize, items: I) -> Self
    where
        I: IntoIterator<Item = (S, Point)>,
        S: Into<String>,
    {
        let vertices: Vec<Vertex> = items
            .into_iter()
            .enumerate()
            .map(|(k, (l, point))| Vertex {
                label: l.into(),
                point,
                incident: HalfEdgeId(k),
            })
            .collect();
        let n = vertices.len();
        if n == 0 {
            return Self::default();
        }
        let half_edges = (0..n)
            .map(|k| HalfEdge {
                origin: VertexId(k),
                face: FaceId(0),
                next: HalfEdgeId((k + 1) % n),
                prev: HalfEdgeId((k + n - 1) % n),
                twin: None,
            })
            .collect();
        Self {
            vertices,
            half_edges,
            faces: vec![Face {
                label,
                incident: HalfEdgeId(0),
            }],
        }
    }

    /// The input polygon as a single face labeled 1.
    pub fn from_polygon(poly: &Polygon) -> Self {
        Self::from_cycle(
            1,
            poly.vertices.iter().map(|v| (v.label.clone(), v.point)),
        )
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }
    pub fn num_half_edges(&self) -> usize {
        self.half_edges.len()
    }
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }
    pub fn half_edge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[id.0]
    }
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.0]
    }

    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.faces.len()).map(FaceId)
    }

    pub fn find_vertex(&self, label: &str) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|v| v.label == label)
            .map(VertexId)
    }

    #[inline]
    pub fn origin(&self, e: HalfEdgeId) -> VertexId {
        self.half_edges[e.0].origin
    }
    #[inline]
    pub fn next(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[e.0].next
    }
    #[inline]
    pub fn prev(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[e.0].prev
    }
    #[inline]
    pub fn point(&self, v: VertexId) -> Point {
        self.vertices[v.0].point
    }

    /// Head vertex of `e` (origin of its successor on the same face).
    #[inline]
    pub fn dest(&self, e: HalfEdgeId) -> VertexId {
        self.origin(self.next(e))
    }

    /// Half-edges of the cycle through `start`, beginning at `start`.
    pub fn face_cycle(&self, start: HalfEdgeId) -> FaceCycle<'_> {
        FaceCycle {
            graph: self,
            start,
            current: start,
            done: false,
        }
    }

    pub fn face_vertices(&self, f: FaceId) -> Vec<VertexId> {
        self.face_cycle(self.faces[f.0].incident)
            .map(|e| self.origin(e))
            .collect()
    }

    pub fn face_labels(&self, f: FaceId) -> Vec<&str> {
        self.face_vertices(f)
            .into_iter()
            .map(|v| self.vertices[v.0].label.as_str())
            .collect()
    }

    pub fn face_points(&self, f: FaceId) -> Vec<Point> {
        self.face_vertices(f)
            .into_iter()
            .map(|v| self.point(v))
            .collect()
    }

    /// Verify the five structural invariants (links, cycles, twins, incidences).
    pub fn check_invariants(&self) -> Result<(), DcelError> {
        let ne = self.half_edges.len();
        let in_range = |what: &'static str, index: usize, len: usize| {
            if index < len {
                Ok(())
            } else {
                Err(DcelError::DanglingHandle { what, index })
            }
        };
        for v in &self.vertices {
            in_range("half-edge", v.incident.0, ne)?;
        }
        for f in &self.faces {
            in_range("half-edge", f.incident.0, ne)?;
        }
        for he in &self.half_edges {
            in_range("vertex", he.origin.0, self.vertices.len())?;
            in_range("face", he.face.0, self.faces.len())?;
            in_range("half-edge", he.next.0, ne)?;
            in_range("half-edge", he.prev.0, ne)?;
            if let Some(t) = he.twin {
                in_range("half-edge", t.0, ne)?;
            }
        }
        for e in (0..ne).map(HalfEdgeId) {
            if self.prev(self.next(e)) != e {
                return Err(DcelError::BrokenLink(e));
            }
            if let Some(t) = self.half_edges[e.0].twin {
                if self.half_edges[t.0].twin != Some(e) || self.dest(t) != self.origin(e) {
                    return Err(DcelError::BrokenTwin(e));
                }
            }
        }
        for (i, v) in self.vertices.iter().enumerate() {
            if self.origin(v.incident) != VertexId(i) {
                return Err(DcelError::VertexIncidence(VertexId(i)));
            }
        }
        for (i, f) in self.faces.iter().enumerate() {
            let face = FaceId(i);
            let mut e = f.incident;
            let mut steps = 0;
            loop {
                if self.half_edges[e.0].face != face {
                    return Err(DcelError::FaceIncidence(face));
                }
                e = self.next(e);
                steps += 1;
                if e == f.incident {
                    break;
                }
                if steps > ne {
                    return Err(DcelError::OpenCycle { face, limit: ne });
                }
            }
        }
        Ok(())
    }

    /// Undirected vertex adjacency over all face boundaries.
    pub fn adjacency(&self) -> Adjacency {
        let n = self.vertices.len();
        let mut matrix = DMatrix::<u8>::zeros(n, n);
        for f in &self.faces {
            for e in self.face_cycle(f.incident) {
                let (a, b) = (self.origin(e).0, self.dest(e).0);
                matrix[(a, b)] = 1;
                matrix[(b, a)] = 1;
            }
        }
        Adjacency {
            labels: self.vertices.iter().map(|v| v.label.clone()).collect(),
            points: self.vertices.iter().map(|v| v.point).collect(),
            matrix,
        }
    }

    pub(crate) fn add_vertex(&mut self, label: String, point: Point, incident: HalfEdgeId) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            label,
            point,
            incident,
        });
        id
    }

    /// Push a half-edge with self-loops as placeholder links.
    pub(crate) fn add_half_edge(&mut self, origin: VertexId, face: FaceId) -> HalfEdgeId {
        let id = HalfEdgeId(self.half_edges.len());
        self.half_edges.push(HalfEdge {
            origin,
            face,
            next: id,
            prev: id,
            twin: None,
        });
        id
    }

    pub(crate) fn add_face(&mut self, label: usize, incident: HalfEdgeId) -> FaceId {
        let id = FaceId(self.faces.len());
        self.faces.push(Face { label, incident });
        id
    }

    /// Set `e.next = next` and `next.prev = e`.
    pub(crate) fn set_next(&mut self, e: HalfEdgeId, next: HalfEdgeId) {
        self.half_edges[e.0].next = next;
        self.half_edges[next.0].prev = e;
    }

    pub(crate) fn half_edge_mut(&mut self, id: HalfEdgeId) -> &mut HalfEdge {
        &mut self.half_edges[id.0]
    }
    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id.0]
    }
    pub(crate) fn face_mut(&mut self, id: FaceId) -> &mut Face {
        &mut self.faces[id.0]
    }

    /// New arena holding only the kept nodes, in their current order.
    ///
    /// `faces` lists the surviving faces in output order. Every kept
    /// half-edge must belong to one of them and link only to kept edges;
    /// twins pointing at dropped edges are cleared.
    pub(crate) fn compact(&self, keep_vertex: &[bool], keep_edge: &[bool], faces: &[FaceId]) -> Graph {
        let remap = |keep: &[bool]| -> Vec<Option<usize>> {
            let mut next = 0;
            keep.iter()
                .map(|&k| {
                    k.then(|| {
                        next += 1;
                        next - 1
                    })
                })
                .collect()
        };
        let vmap = remap(keep_vertex);
        let emap = remap(keep_edge);
        let mut fmap = vec![None; self.faces.len()];
        for (k, f) in faces.iter().enumerate() {
            fmap[f.0] = Some(k);
        }
        let e_of = |e: HalfEdgeId| HalfEdgeId(emap[e.0].unwrap_or(usize::MAX));

        let vertices = self
            .vertices
            .iter()
            .zip(&vmap)
            .filter(|(_, m)| m.is_some())
            .map(|(v, _)| Vertex {
                label: v.label.clone(),
                point: v.point,
                incident: e_of(v.incident),
            })
            .collect();
        let half_edges = self
            .half_edges
            .iter()
            .zip(&emap)
            .filter(|(_, m)| m.is_some())
            .map(|(he, _)| HalfEdge {
                origin: VertexId(vmap[he.origin.0].unwrap_or(usize::MAX)),
                face: FaceId(fmap[he.face.0].unwrap_or(usize::MAX)),
                next: e_of(he.next),
                prev: e_of(he.prev),
                twin: he.twin.and_then(|t| emap[t.0].map(HalfEdgeId)),
            })
            .collect();
        let faces = faces
            .iter()
            .map(|f| Face {
                label: self.faces[f.0].label,
                incident: e_of(self.faces[f.0].incident),
            })
            .collect();
        Graph {
            vertices,
            half_edges,
            faces,
        }
    }
}

/// Iterator over half-edges in a face cycle.
pub struct FaceCycle<'a> {
    graph: &'a Graph,
    start: HalfEdgeId,
    current: HalfEdgeId,
    done: bool,
}

impl<'a> Iterator for FaceCycle<'a> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        if self.done {
            return None;
        }
        let he = self.current;
        self.current = self.graph.next(he);
        if self.current == self.start {
            self.done = true;
        }
        Some(he)
    }
}

/// Vertex list plus symmetric 0/1 adjacency matrix, indexed alike.
#[derive(Clone, Debug, PartialEq)]
pub struct Adjacency {
    pub labels: Vec<String>,
    pub points: Vec<Point>,
    pub matrix: DMatrix<u8>,
}

impl Adjacency {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Connected pairs `(i, j)` with `j < i`, row by row.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        let n = self.len();
        (0..n)
            .flat_map(|i| (0..i).map(move |j| (i, j)))
            .filter(|&(i, j)| self.matrix[(i, j)] == 1)
            .collect()
    }
}
