//! Greedy extraction of one convex face from the residual polygon.

use crate::dcel::Graph;
use crate::geom2::{is_reflex, point_in_polygon, Bounds2};

use super::residual::Residual;

/// Result of one extraction attempt.
#[derive(Clone, Debug)]
pub enum Extraction {
    /// One-face graph; the residual has already been cut.
    Partition(Graph),
    /// Fewer than 3 residual vertices; nothing was changed.
    Exhausted,
    /// Backtracking shrank the candidate to 2 vertices; nothing was changed.
    Blocked,
}

impl Extraction {
    pub fn into_partition(self) -> Option<Graph> {
        match self {
            Extraction::Partition(g) => Some(g),
            _ => None,
        }
    }
}

/// Grow a convex face from position `start` (taken modulo the residual size)
/// and cut it off the residual. The face is labeled `number`.
///
/// The candidate walks forward while the corner at the tail, the corner the
/// closing diagonal would make at the new vertex, and the corner it would
/// make at `start` all stay convex. It then drops trailing vertices while
/// any reflex residual vertex outside the candidate lies in its bounding box
/// and inside or on its boundary.
pub fn extract(residual: &mut Residual, start: usize, number: usize) -> Extraction {
    let n = residual.len();
    if n <= 2 {
        return Extraction::Exhausted;
    }
    let s = start % n;
    let at = |k: usize| residual.point_at(k as isize);
    let reflex_at = |k: usize| {
        let k = k as isize;
        is_reflex(
            residual.point_at(k - 1),
            residual.point_at(k),
            residual.point_at(k + 1),
        )
    };

    let mut cand = vec![s, (s + 1) % n];
    let mut taken = vec![false; n];
    taken[s] = true;
    taken[(s + 1) % n] = true;
    let mut i = (s + 1) % n;
    let mut closed = false;
    while !reflex_at(i)
        && !is_reflex(at(i), at(i + 1), at(s))
        && !is_reflex(at(i + 1), at(s), at(s + 1))
    {
        let j = (i + 1) % n;
        if j == s {
            closed = true;
            break;
        }
        cand.push(j);
        taken[j] = true;
        i = j;
    }

    if !closed {
        'scan: loop {
            if cand.len() <= 2 {
                return Extraction::Blocked;
            }
            let ring: Vec<_> = cand.iter().map(|&k| at(k)).collect();
            let Some(bounds) = Bounds2::around(ring.iter().copied()) else {
                return Extraction::Blocked;
            };
            for k in (0..n).filter(|&k| !taken[k]) {
                let p = at(k);
                if reflex_at(k) && bounds.contains(p) && point_in_polygon(&ring, p).is_covered() {
                    if let Some(last) = cand.pop() {
                        taken[last] = false;
                    }
                    continue 'scan;
                }
            }
            break;
        }
    }

    let partition = Graph::from_cycle(
        number,
        cand.iter()
            .map(|&k| (residual.label_at(k).to_owned(), at(k))),
    );
    if cand.len() == n {
        residual.clear();
    } else if let Some(&last) = cand.last() {
        residual.cut(s, last);
    }
    Extraction::Partition(partition)
}
