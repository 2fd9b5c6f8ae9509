use kolam::{trace_threads, Graph, Point, Thread, WorkItem};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

const N: usize = 4;

// Every edge of the N x N king graph. Spokes of a vertex are at least 45
// degrees apart, so any rigid motion keeps their order around the vertex.
fn king_edges() -> Vec<(usize, usize)> {
    let ix = |i: usize, j: usize| j * N + i;
    let mut out = Vec::new();
    for j in 0..N {
        for i in 0..N {
            if i + 1 < N {
                out.push((ix(i, j), ix(i + 1, j)));
            }
            if j + 1 < N {
                out.push((ix(i, j), ix(i, j + 1)));
            }
            if i + 1 < N && j + 1 < N {
                out.push((ix(i, j), ix(i + 1, j + 1)));
            }
            if i > 0 && j + 1 < N {
                out.push((ix(i, j), ix(i - 1, j + 1)));
            }
        }
    }
    out
}

// King edges plus links that jump over one vertex along a row or column:
// each jump runs alongside two short spokes in the same direction.
fn spoke_edges() -> Vec<(usize, usize)> {
    let ix = |i: usize, j: usize| j * N + i;
    let mut out = king_edges();
    for j in 0..N {
        for i in 0..N {
            if i + 2 < N {
                out.push((ix(i, j), ix(i + 2, j)));
            }
            if j + 2 < N {
                out.push((ix(i, j), ix(i, j + 2)));
            }
        }
    }
    out
}

fn build(mask: &[bool], place: impl Fn(f64, f64) -> Point) -> Graph {
    build_from(king_edges(), mask, place)
}

fn build_from(all: Vec<(usize, usize)>, mask: &[bool], place: impl Fn(f64, f64) -> Point) -> Graph {
    let mut pts = Vec::with_capacity(N * N);
    for j in 0..N {
        for i in 0..N {
            pts.push(place(i as f64, j as f64));
        }
    }
    let edges: Vec<(usize, usize)> = all
        .into_iter()
        .zip(mask)
        .filter(|(_, keep)| **keep)
        .map(|(e, _)| e)
        .collect();
    Graph::from_parts(&pts, &edges).unwrap()
}

fn mask_strategy() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), king_edges().len())
}

fn spoke_mask_strategy() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), spoke_edges().len())
}

fn assert_partition(g: &Graph) -> Result<(), TestCaseError> {
    let threads = trace_threads(g).unwrap();
    let mut seen = HashSet::new();
    for t in &threads {
        prop_assert_eq!(t.steps() % 2, 0);
        prop_assert_eq!(t.path[t.steps()], t.path[0]);
        for item in t.work_items() {
            prop_assert!(g.has_edge(item.from, item.to));
            prop_assert!(seen.insert(item));
        }
    }
    prop_assert_eq!(seen.len(), 4 * g.edge_count());
    Ok(())
}

// Threads as cycles of work items, each rotated to start at its smallest item
fn cycles(threads: &[Thread]) -> BTreeSet<Vec<WorkItem>> {
    threads
        .iter()
        .map(|t| {
            let mut items: Vec<WorkItem> = t.work_items().collect();
            let start = items
                .iter()
                .enumerate()
                .min_by_key(|(_, w)| **w)
                .map_or(0, |(i, _)| i);
            items.rotate_left(start);
            items
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn prop_threads_partition_work_items(mask in mask_strategy()) {
        assert_partition(&build(&mask, Point::new))?;
    }

    #[test]
    fn prop_collinear_spokes_partition_work_items(mask in spoke_mask_strategy(), k in 0.5f64..40.0) {
        assert_partition(&build_from(spoke_edges(), &mask, |x, y| Point::new(x * k, y * k)))?;
    }

    #[test]
    fn prop_rigid_motion_keeps_threads(
        mask in mask_strategy(),
        quarter in 0u8..4,
        tx in -50i32..50,
        ty in -50i32..50,
    ) {
        let base = build(&mask, Point::new);
        let moved = build(&mask, |x, y| {
            let (rx, ry) = match quarter {
                0 => (x, y),
                1 => (-y, x),
                2 => (-x, -y),
                _ => (y, -x),
            };
            Point::new(rx + tx as f64, ry + ty as f64)
        });
        let a = cycles(&trace_threads(&base).unwrap());
        let b = cycles(&trace_threads(&moved).unwrap());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_any_rotation_keeps_threads(
        mask in mask_strategy(),
        angle in 0.0f64..std::f64::consts::TAU,
        tx in -500.0f64..500.0,
        ty in -500.0f64..500.0,
    ) {
        let (sin, cos) = angle.sin_cos();
        let base = build(&mask, Point::new);
        let moved = build(&mask, |x, y| Point::new(x * cos - y * sin + tx, x * sin + y * cos + ty));
        let a = cycles(&trace_threads(&base).unwrap());
        let b = cycles(&trace_threads(&moved).unwrap());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_text_round_trip(
        mask in mask_strategy(),
        k in 1.0e-3f64..1.0e4,
        jitter in prop::collection::vec(-0.4f64..0.4, 2 * N * N),
    ) {
        let g = build(&mask, |x, y| {
            let i = 2 * (y as usize * N + x as usize);
            Point::new((x + jitter[i]) * k - 1.0, (y + jitter[i + 1]) * k)
        });
        let back = Graph::from_text(&g.to_text()).unwrap();
        prop_assert_eq!(back.points(), g.points());
        prop_assert_eq!(back.edges(), g.edges());
    }
}
