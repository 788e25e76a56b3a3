//! Exact geometric predicates on `f64` points.
//!
//! Conventions
//! - Polygons are walked clockwise. `is_reflex` is defined for that winding;
//!   feeding a counter-clockwise polygon flips its meaning.
//! - Collinear is never a strict crossing. Callers that need "on the segment"
//!   combine `orientation == Collinear` with `on_segment`.

use super::types::{Orientation, Point, Segment};

/// Orientation of the turn `a → b → c`.
///
/// Sign of `(b − a) × (c − b)`, reported as `Clockwise` when the cross
/// product is negative.
#[inline]
pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let val = (b.y - a.y) * (c.x - b.x) - (b.x - a.x) * (c.y - b.y);
    if val == 0.0 {
        Orientation::Collinear
    } else if val < 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

/// Bounding-box containment of `p` in `seg`.
///
/// This is not a colinearity test; pair it with `orientation`.
#[inline]
pub fn on_segment(seg: Segment, p: Point) -> bool {
    p.x <= seg.a.x.max(seg.b.x)
        && p.x >= seg.a.x.min(seg.b.x)
        && p.y <= seg.a.y.max(seg.b.y)
        && p.y >= seg.a.y.min(seg.b.y)
}

/// Closed-segment intersection test (touching counts).
pub fn segments_intersect(s1: Segment, s2: Segment) -> bool {
    let o1 = orientation(s1.a, s1.b, s2.a);
    let o2 = orientation(s1.a, s1.b, s2.b);
    let o3 = orientation(s2.a, s2.b, s1.a);
    let o4 = orientation(s2.a, s2.b, s1.b);

    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == Orientation::Collinear && on_segment(s1, s2.a))
        || (o2 == Orientation::Collinear && on_segment(s1, s2.b))
        || (o3 == Orientation::Collinear && on_segment(s2, s1.a))
        || (o4 == Orientation::Collinear && on_segment(s2, s1.b))
}

/// How a boundary side meets a ray, given the side that follows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crossing {
    /// `side` and `ray` do not meet.
    None,
    /// Ordinary crossing away from the shared vertex `side.b`.
    Transversal,
    /// The ray passes through `side.b` and the flanking sides leave it on
    /// opposite sides of the ray (a real crossing).
    EndpointOpposite,
    /// The ray passes through `side.b` and both flanking sides stay on the
    /// same side of the ray (a touch).
    EndpointSame,
}

/// Classify `side` against `ray`, using `next.b` as the far flank when the
/// ray runs exactly through the vertex `side.b`.
pub fn segments_intersect3(side: Segment, ray: Segment, next: Segment) -> Crossing {
    if !segments_intersect(side, ray) {
        return Crossing::None;
    }
    if orientation(ray.a, ray.b, side.b) == Orientation::Collinear && on_segment(ray, side.b) {
        let before = orientation(ray.a, ray.b, side.a);
        let after = orientation(ray.a, ray.b, next.b);
        return if before == after {
            Crossing::EndpointSame
        } else {
            Crossing::EndpointOpposite
        };
    }
    Crossing::Transversal
}

/// Result of a point-in-polygon query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Inside,
    Outside,
    Boundary,
}

impl Location {
    /// `Inside` or `Boundary`.
    #[inline]
    pub fn is_covered(self) -> bool {
        !matches!(self, Location::Outside)
    }
}

/// Ray-casting point-in-polygon test for the cyclic boundary `poly`.
///
/// The ray is horizontal towards `+x`. A transversal crossing adds one; a
/// ray through a vertex is charged to the side ending there (0 for a real
/// crossing, −1 for a touch) and to the side leaving it (+1), so each vertex
/// is counted once. Sides lying on the ray line contribute nothing and are
/// skipped when looking for the far flank.
pub fn point_in_polygon(poly: &[Point], p: Point) -> Location {
    let n = poly.len();
    if n < 3 {
        return Location::Outside;
    }
    let far_x = poly.iter().fold(p.x, |m, q| m.max(q.x)) + 1.0;
    let ray = Segment::new(p, Point::new(far_x, p.y));
    let on_ray_line = |s: Segment| s.a.y == p.y && s.b.y == p.y;
    let side_at = |i: usize| Segment::new(poly[i % n], poly[(i + 1) % n]);

    let mut count: i64 = 0;
    for i in 0..n {
        let side = side_at(i);
        if orientation(side.a, p, side.b) == Orientation::Collinear && on_segment(side, p) {
            return Location::Boundary;
        }
        if on_ray_line(side) {
            continue;
        }
        let next = (1..=n)
            .map(|k| side_at(i + k))
            .find(|s| !on_ray_line(*s))
            .unwrap_or(side);
        match segments_intersect3(side, ray, next) {
            Crossing::None | Crossing::EndpointOpposite => {}
            Crossing::Transversal => count += 1,
            Crossing::EndpointSame => count -= 1,
        }
    }
    if count.rem_euclid(2) == 1 {
        Location::Inside
    } else {
        Location::Outside
    }
}

/// True iff the interior angle at `b` on the clockwise walk `a → b → c`
/// exceeds 180°. Collinear triples are not reflex.
#[inline]
pub fn is_reflex(a: Point, b: Point, c: Point) -> bool {
    let u = a - b;
    let v = c - b;
    u.x * v.y - v.x * u.y < 0.0
}
