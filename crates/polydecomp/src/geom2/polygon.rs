//! Input polygon: an ordered, labeled vertex list.
//!
//! Precondition (not validated): the polygon is simple, walked clockwise,
//! and both labels and coordinates are unique. Behavior on other inputs is
//! undefined; `is_clockwise` is offered so callers can report a violation.

use super::types::Point;

/// A labeled polygon vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonVertex {
    pub label: String,
    pub point: Point,
}

/// Simple polygon as a clockwise vertex sequence (closing edge implied).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<PolygonVertex>,
}

impl Polygon {
    pub fn new(vertices: Vec<PolygonVertex>) -> Self {
        Self { vertices }
    }

    /// Build from `(label, x, y)` triples.
    pub fn from_labeled<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: Into<String>,
    {
        Self {
            vertices: items
                .into_iter()
                .map(|(label, x, y)| PolygonVertex {
                    label: label.into(),
                    point: Point::new(x, y),
                })
                .collect(),
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

    pub fn labels(&self) -> Vec<&str> {
        self.vertices.iter().map(|v| v.label.as_str()).collect()
    }

    pub fn points(&self) -> Vec<Point> {
        self.vertices.iter().map(|v| v.point).collect()
    }

    /// Shoelace area; negative for clockwise order.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let p = self.vertices[i].point;
                let q = self.vertices[(i + 1) % n].point;
                p.x * q.y - q.x * p.y
            })
            .sum();
        0.5 * twice
    }

    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }
}
