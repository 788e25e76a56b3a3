use std::collections::BTreeSet;

use super::*;
use crate::dcel::{Graph, HalfEdgeId};
use crate::error::DecomposeError;
use crate::geom2::rand::{draw_star_polygon, ReplayToken, StarCfg, VertexCount};
use crate::geom2::{is_reflex, Point, Polygon};
use proptest::prelude::*;

fn dart() -> Polygon {
    Polygon::from_labeled([
        ("A", 0.0, 0.0),
        ("B", 0.0, 6.0),
        ("C", 3.0, 3.0),
        ("D", 6.0, 6.0),
        ("E", 6.0, 0.0),
    ])
}

fn square() -> Polygon {
    Polygon::from_labeled([
        ("A", 0.0, 0.0),
        ("B", 0.0, 1.0),
        ("C", 1.0, 1.0),
        ("D", 1.0, 0.0),
    ])
}

fn l_shape() -> Polygon {
    Polygon::from_labeled([
        ("A", 0.0, 0.0),
        ("B", 0.0, 2.0),
        ("C", 1.0, 2.0),
        ("D", 1.0, 1.0),
        ("E", 2.0, 1.0),
        ("F", 2.0, 0.0),
    ])
}

/// Square with a spike rising from the bottom edge; only F is reflex.
fn notch() -> Polygon {
    Polygon::from_labeled([
        ("A", 0.0, 0.0),
        ("B", 0.0, 10.0),
        ("C", 10.0, 10.0),
        ("D", 10.0, 0.0),
        ("E", 6.0, 0.0),
        ("F", 5.0, 8.0),
        ("G", 4.0, 0.0),
    ])
}

/// Square with a dent in the right side at E; greedy growth overshoots by one.
fn dent() -> Polygon {
    Polygon::from_labeled([
        ("A", 0.0, 0.0),
        ("B", 0.0, 10.0),
        ("C", 10.0, 10.0),
        ("D", 10.0, 6.0),
        ("E", 6.0, 5.0),
        ("F", 10.0, 4.0),
        ("G", 10.0, 0.0),
    ])
}

fn cycle_of(items: &[(&str, f64, f64)]) -> Vec<(String, Point)> {
    items
        .iter()
        .map(|&(l, x, y)| (l.to_string(), Point::new(x, y)))
        .collect()
}

fn all_face_labels(g: &Graph) -> Vec<Vec<String>> {
    g.face_ids()
        .map(|f| g.face_labels(f).into_iter().map(String::from).collect())
        .collect()
}

/// Vertex conservation, convexity, boundary coverage, twin sanity.
fn assert_valid_decomposition(poly: &Polygon, g: &Graph) {
    g.check_invariants().unwrap();

    let input: BTreeSet<&str> = poly.labels().into_iter().collect();
    let vertices: BTreeSet<&str> = g.vertices().iter().map(|v| v.label.as_str()).collect();
    assert_eq!(vertices, input);
    assert_eq!(g.num_vertices(), poly.len());
    let on_faces: BTreeSet<&str> = g.face_ids().flat_map(|f| g.face_labels(f)).collect();
    assert_eq!(on_faces, input);

    for f in g.face_ids() {
        let pts = g.face_points(f);
        let m = pts.len();
        assert!(m >= 3);
        for k in 0..m {
            assert!(!is_reflex(pts[(k + m - 1) % m], pts[k], pts[(k + 1) % m]));
        }
    }

    let n = poly.len();
    for i in 0..n {
        let (a, b) = (&poly.vertices[i].label, &poly.vertices[(i + 1) % n].label);
        let uses = g
            .half_edges()
            .iter()
            .enumerate()
            .filter(|(k, _)| {
                let e = HalfEdgeId(*k);
                let (o, d) = (&g.vertex(g.origin(e)).label, &g.vertex(g.dest(e)).label);
                (o == a && d == b) || (o == b && d == a)
            })
            .count();
        assert_eq!(uses, 1, "boundary edge {a}-{b}");
    }

    for he in g.half_edges() {
        if let Some(t) = he.twin {
            assert_ne!(g.half_edge(t).face, he.face);
        }
    }
}

#[derive(Default)]
struct Recorder {
    started: Vec<usize>,
    partitions: usize,
    merges: Vec<MergeOutcome>,
    probes: Vec<(usize, Option<Vec<String>>)>,
    skipped: Vec<usize>,
    finished: Vec<(usize, Option<usize>)>,
}

impl SearchObserver for Recorder {
    fn attempt_started(&mut self, offset: usize, _residual: &Residual) {
        self.started.push(offset);
    }
    fn partition_extracted(&mut self, _number: usize, _partition: &Graph) {
        self.partitions += 1;
    }
    fn decomposition_merged(&mut self, _decomposition: &Graph, outcome: MergeOutcome) {
        self.merges.push(outcome);
    }
    fn first_partition_probed(&mut self, offset: usize, partition: Option<&Graph>) {
        self.probes
            .push((offset, partition.map(|g| all_face_labels(g).remove(0))));
    }
    fn rotation_skipped(&mut self, offset: usize) {
        self.skipped.push(offset);
    }
    fn attempt_finished(&mut self, offset: usize, faces: Option<usize>) {
        self.finished.push((offset, faces));
    }
}

#[test]
fn dart_needs_two_faces_sharing_the_notch() {
    let poly = dart();
    let res = decompose(&poly).unwrap();
    assert_eq!(res.min_faces, 2);
    let best = res.best();
    assert_eq!(best.faces, 2);
    assert_eq!(best.offset, 0);
    for f in best.graph.face_ids() {
        assert!(best.graph.face_labels(f).contains(&"C"));
    }
    for d in &res.minimal {
        assert_valid_decomposition(&poly, &d.graph);
    }
}

#[test]
fn dart_offset_zero_splits_along_a_c() {
    let d = decompose_from(&dart(), 0, &mut NoopObserver).unwrap();
    assert_eq!(
        all_face_labels(&d.graph),
        vec![vec!["A", "B", "C"], vec!["C", "D", "E", "A"]]
    );
    let twins = d.graph.half_edges().iter().filter(|e| e.twin.is_some()).count();
    assert_eq!(twins, 2);
}

#[test]
fn square_is_one_face_and_later_rotations_are_skipped() {
    let poly = square();
    let res = decompose(&poly).unwrap();
    assert_eq!(res.min_faces, 1);
    assert_eq!(
        all_face_labels(&res.best().graph),
        vec![vec!["A", "B", "C", "D"]]
    );
    assert_eq!(res.explored, vec![0]);
    assert_eq!(res.skipped, vec![1, 2, 3]);
    assert_valid_decomposition(&poly, &res.best().graph);
}

#[test]
fn disabling_dedup_runs_every_offset() {
    let poly = square();
    let cfg = SearchCfg {
        dedup_rotations: false,
    };
    let res = decompose_with(&poly, cfg, &mut NoopObserver).unwrap();
    assert_eq!(res.explored, vec![0, 1, 2, 3]);
    assert!(res.skipped.is_empty());
    assert_eq!(res.minimal.len(), 4);
    assert!(res.minimal.iter().all(|d| d.faces == 1));
}

#[test]
fn l_shape_keeps_essential_diagonal_as_twins() {
    let poly = l_shape();
    let d = decompose_from(&poly, 0, &mut NoopObserver).unwrap();
    assert_eq!(
        all_face_labels(&d.graph),
        vec![vec!["A", "B", "C", "D"], vec!["D", "E", "F", "A"]]
    );
    let g = &d.graph;
    let twinned: Vec<(String, String)> = g
        .half_edges()
        .iter()
        .enumerate()
        .filter(|(_, e)| e.twin.is_some())
        .map(|(k, _)| {
            let e = HalfEdgeId(k);
            (
                g.vertex(g.origin(e)).label.clone(),
                g.vertex(g.dest(e)).label.clone(),
            )
        })
        .collect();
    assert_eq!(
        twinned,
        vec![
            ("D".to_string(), "A".to_string()),
            ("A".to_string(), "D".to_string())
        ]
    );
    assert_eq!(decompose(&poly).unwrap().min_faces, 2);
}

#[test]
fn notch_takes_three_faces() {
    let poly = notch();
    let d = decompose_from(&poly, 0, &mut NoopObserver).unwrap();
    assert_eq!(
        all_face_labels(&d.graph),
        vec![
            vec!["C", "D", "E", "F"],
            vec!["F", "G", "A", "B"],
            vec!["B", "C", "F"],
        ]
    );
    assert_valid_decomposition(&poly, &d.graph);
    assert_eq!(decompose(&poly).unwrap().min_faces, 3);
}

#[test]
fn blocked_extraction_leaves_residual_untouched() {
    let mut r = Residual::from_polygon(&notch());
    assert!(matches!(extract(&mut r, 0, 1), Extraction::Blocked));
    assert!(matches!(extract(&mut r, 1, 1), Extraction::Blocked));
    assert_eq!(r.labels(), vec!["A", "B", "C", "D", "E", "F", "G"]);

    let part = extract(&mut r, 2, 1).into_partition().unwrap();
    assert_eq!(all_face_labels(&part), vec![vec!["C", "D", "E", "F"]]);
    assert_eq!(r.labels(), vec!["F", "G", "A", "B", "C"]);
}

#[test]
fn backtracking_drops_only_the_overshoot() {
    let mut r = Residual::from_polygon(&dent());
    let part = extract(&mut r, 0, 7).into_partition().unwrap();
    assert_eq!(part.face(crate::dcel::FaceId(0)).label, 7);
    assert_eq!(all_face_labels(&part), vec![vec!["A", "B", "C"]]);
    assert_eq!(r.labels(), vec!["C", "D", "E", "F", "G", "A"]);
    r.graph().check_invariants().unwrap();
    // The diagonal A -> C closes the residual and is its incident edge.
    let g = r.graph();
    let last = g.face_cycle(g.faces()[0].incident).next().unwrap();
    assert_eq!(g.vertex(g.origin(last)).label, "A");
    assert_eq!(g.vertex(g.dest(last)).label, "C");
}

#[test]
fn start_index_wraps_around() {
    let mut r = Residual::from_polygon(&square());
    let part = extract(&mut r, 6, 1).into_partition().unwrap();
    assert_eq!(all_face_labels(&part), vec![vec!["C", "D", "A", "B"]]);
    assert!(r.is_empty());
    assert!(matches!(extract(&mut r, 0, 2), Extraction::Exhausted));
}

#[test]
fn tiny_residual_is_exhausted() {
    let mut r = Residual::from_polygon(&Polygon::from_labeled([("A", 0.0, 0.0), ("B", 1.0, 1.0)]));
    assert!(matches!(extract(&mut r, 0, 1), Extraction::Exhausted));
    assert_eq!(r.len(), 2);
}

#[test]
fn merge_with_missing_side_passes_through() {
    let tri = Graph::from_cycle(1, cycle_of(&[("A", 0.0, 0.0), ("B", 0.0, 1.0), ("C", 1.0, 1.0)]));
    let (g, out) = merge(None, Some(tri.clone()));
    assert_eq!(g.unwrap().num_faces(), 1);
    assert_eq!(out, MergeOutcome::default());

    let (g, out) = merge(Some(tri), None);
    assert_eq!(g.unwrap().num_faces(), 1);
    assert!(out.face_added);

    let (g, _) = merge(None, None);
    assert!(g.is_none());
}

#[test]
fn merge_elides_unneeded_diagonal() {
    let acc = Graph::from_cycle(1, cycle_of(&[("A", 0.0, 0.0), ("B", 0.0, 1.0), ("C", 1.0, 1.0)]));
    let part = Graph::from_cycle(2, cycle_of(&[("C", 1.0, 1.0), ("D", 1.0, 0.0), ("A", 0.0, 0.0)]));
    let (g, out) = merge(Some(part), Some(acc));
    let g = g.unwrap();
    assert_eq!(
        out,
        MergeOutcome {
            face_added: false,
            elided: 1,
            faces_fused: 0
        }
    );
    g.check_invariants().unwrap();
    assert_eq!(g.num_vertices(), 4);
    assert_eq!(g.num_half_edges(), 4);
    assert_eq!(all_face_labels(&g), vec![vec!["A", "B", "C", "D"]]);
    assert_eq!(g.faces()[0].label, 1);
    assert!(g.half_edges().iter().all(|e| e.twin.is_none()));
}

#[test]
fn merge_twins_essential_diagonal() {
    let acc = Graph::from_cycle(1, cycle_of(&[("A", 0.0, 0.0), ("B", 0.0, 6.0), ("C", 3.0, 3.0)]));
    let part = Graph::from_cycle(
        2,
        cycle_of(&[("C", 3.0, 3.0), ("D", 6.0, 6.0), ("E", 6.0, 0.0), ("A", 0.0, 0.0)]),
    );
    let (g, out) = merge(Some(part), Some(acc));
    let g = g.unwrap();
    assert!(out.face_added);
    assert_eq!(out.elided, 0);
    g.check_invariants().unwrap();
    assert_eq!(g.num_vertices(), 5);
    assert_eq!(g.num_half_edges(), 7);
    assert_eq!(g.num_faces(), 2);
    assert_eq!(g.faces()[1].label, 2);
}

#[test]
fn merge_of_disjoint_faces_keeps_both() {
    let acc = Graph::from_cycle(1, cycle_of(&[("A", 0.0, 0.0), ("B", 0.0, 1.0), ("C", 1.0, 1.0)]));
    let part = Graph::from_cycle(2, cycle_of(&[("X", 5.0, 5.0), ("Y", 5.0, 6.0), ("Z", 6.0, 5.0)]));
    let (g, out) = merge(Some(part), Some(acc));
    let g = g.unwrap();
    assert!(out.face_added);
    assert_eq!(g.num_faces(), 2);
    assert_eq!(g.num_vertices(), 6);
}

#[test]
fn too_few_vertices_is_an_error() {
    let poly = Polygon::from_labeled([("A", 0.0, 0.0), ("B", 1.0, 1.0)]);
    assert_eq!(
        decompose(&poly).unwrap_err(),
        DecomposeError::TooFewVertices { count: 2 }
    );
}

#[test]
fn observer_sees_every_attempt_and_probe() {
    let mut rec = Recorder::default();
    let res = decompose_with(&dart(), SearchCfg::default(), &mut rec).unwrap();
    assert_eq!(rec.started, res.explored);
    assert_eq!(rec.skipped, res.skipped);
    assert_eq!(rec.finished.len(), res.explored.len());
    assert_eq!(rec.finished[0], (0, Some(2)));
    assert_eq!(rec.merges.len(), rec.partitions);
    assert!(rec.merges[0].face_added);
    // Offset 1 is blocked at B and starts at C instead.
    assert_eq!(
        rec.probes[0],
        (
            1,
            Some(vec!["C".into(), "D".into(), "E".into(), "A".into()])
        )
    );
    assert_eq!(rec.probes.len(), 4);
}

#[test]
fn search_is_never_worse_than_offset_zero_on_stars() {
    let cfg = StarCfg {
        vertex_count: VertexCount::Fixed(12),
        ..StarCfg::default()
    };
    for seed in 0..12 {
        let poly = draw_star_polygon(cfg, ReplayToken { seed, index: 0 }).unwrap();
        let Ok(res) = decompose(&poly) else { continue };
        for d in &res.minimal {
            assert_valid_decomposition(&poly, &d.graph);
        }
        if let Some(d0) = decompose_from(&poly, 0, &mut NoopObserver) {
            assert!(res.min_faces <= d0.faces);
        }
    }
}

proptest! {
    #[test]
    fn convex_polygons_are_one_face_from_every_offset(n in 3usize..24, r in 1.0f64..500.0) {
        let poly = Polygon::from_labeled((0..n).map(|k| {
            let t = -2.0 * std::f64::consts::PI * (k as f64) / (n as f64);
            (format!("v{k}"), r * t.cos(), r * t.sin())
        }));
        let cfg = SearchCfg { dedup_rotations: false };
        let res = decompose_with(&poly, cfg, &mut NoopObserver).unwrap();
        prop_assert_eq!(res.min_faces, 1);
        prop_assert_eq!(res.minimal.len(), n);
        for d in &res.minimal {
            prop_assert_eq!(d.graph.num_faces(), 1);
            prop_assert_eq!(d.graph.face_labels(crate::dcel::FaceId(0)).len(), n);
        }
    }
}
