//! End-to-end checks on small skeletons.

use kolam::{render_knotwork, trace_threads, Graph, KnotworkStyle, KolamError, Point, Thread, WorkItem};
use std::collections::HashSet;

fn graph(points: &[(f64, f64)], edges: &[(usize, usize)]) -> Graph {
    let pts: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
    Graph::from_parts(&pts, edges).unwrap()
}

fn covered(threads: &[Thread]) -> HashSet<WorkItem> {
    let mut seen = HashSet::new();
    for t in threads {
        for item in t.work_items() {
            assert!(seen.insert(item), "{item:?} covered twice");
        }
    }
    seen
}

#[test]
fn square_threads_visit_every_corner() {
    let g = graph(
        &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
        &[(0, 1), (1, 2), (2, 3), (3, 0)],
    );
    let threads = trace_threads(&g).unwrap();
    assert_eq!(covered(&threads).len(), 16);
    for t in &threads {
        assert_eq!(t.steps() % 2, 0);
        let corners: HashSet<_> = t.cycle().iter().copied().collect();
        assert_eq!(corners.len(), 4);
    }

    let d = render_knotwork(&g, &KnotworkStyle::default()).unwrap();
    assert_eq!(d.arcs.len(), 16);
    assert_eq!(d.thread_count(), threads.len());
}

#[test]
fn single_edge_bounces_into_loops() {
    let g = graph(&[(0.0, 0.0), (4.0, 0.0)], &[(0, 1)]);
    let threads = trace_threads(&g).unwrap();
    assert_eq!(covered(&threads).len(), 4);
    for t in &threads {
        assert_eq!(t.steps(), 2);
    }

    let style = KnotworkStyle::default();
    let d = render_knotwork(&g, &style).unwrap();
    let mid = Point::new(2.0, 0.0);
    for arc in &d.arcs {
        // Zero midpoint distance falls back to loop_size / spread * |uv|
        let reach = arc.points.iter().map(|p| p.distance(mid)).fold(0.0, f64::max);
        assert!(reach > 1.0 && reach < 8.0, "{reach}");
    }
}

#[test]
fn coincident_endpoints_are_rejected_at_construction() {
    let mut g = Graph::new();
    let p = Point::new(1.5, -2.0);
    assert!(matches!(g.add_segment(p, p), Err(KolamError::ZeroLengthEdge { .. })));
    assert_eq!(g.edge_count(), 0);
    assert!(trace_threads(&g).unwrap().is_empty());
}

#[test]
fn plus_sign_bounces_off_every_arm() {
    let g = graph(
        &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)],
        &[(0, 1), (0, 2), (0, 3), (0, 4)],
    );
    let threads = trace_threads(&g).unwrap();
    assert_eq!(covered(&threads).len(), 16);
    let d = render_knotwork(&g, &KnotworkStyle::default()).unwrap();
    assert_eq!(d.arcs.len(), 16);
    assert_eq!(d.skeleton.len(), 4);
}

#[test]
fn grid_with_diagonals_is_partitioned() {
    let mut pts = Vec::new();
    for j in 0..3 {
        for i in 0..3 {
            pts.push((i as f64, j as f64));
        }
    }
    let ix = |i: usize, j: usize| j * 3 + i;
    let mut edges = Vec::new();
    for j in 0..3 {
        for i in 0..3 {
            if i + 1 < 3 {
                edges.push((ix(i, j), ix(i + 1, j)));
            }
            if j + 1 < 3 {
                edges.push((ix(i, j), ix(i, j + 1)));
            }
            if i + 1 < 3 && j + 1 < 3 {
                edges.push((ix(i, j), ix(i + 1, j + 1)));
            }
        }
    }
    let g = graph(&pts, &edges);
    let threads = trace_threads(&g).unwrap();
    assert_eq!(covered(&threads).len(), 4 * g.edge_count());
    let d = render_knotwork(&g, &KnotworkStyle::default()).unwrap();
    assert_eq!(d.arcs.len(), 4 * g.edge_count());
    assert!(d.arcs.iter().all(|a| a.points.iter().all(|p| p.is_finite())));
}

#[test]
fn insertion_order_does_not_change_the_decomposition() {
    let pts = [(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0), (1.0, 2.0)];
    let edges = [(0, 1), (1, 2), (2, 3), (3, 0), (2, 4), (3, 4)];
    let a = graph(&pts, &edges);
    let mut rev_edges = edges.to_vec();
    rev_edges.reverse();
    let b = graph(&pts, &rev_edges);

    let by_coords = |g: &Graph| -> Vec<Vec<(Point, Point)>> {
        trace_threads(g)
            .unwrap()
            .iter()
            .map(|t| {
                t.work_items()
                    .map(|w| (g.point(w.from).unwrap(), g.point(w.to).unwrap()))
                    .collect()
            })
            .collect()
    };
    assert_eq!(by_coords(&a), by_coords(&b));
}
