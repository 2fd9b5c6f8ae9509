#[cfg(feature = "bench_trace")]
use kolam::{render_threads, trace_threads, Graph, KnotworkStyle, Point};
#[cfg(feature = "bench_trace")]
use std::time::Instant;

#[cfg(not(feature = "bench_trace"))]
fn main() {
    panic!("trace_bench requires --features bench_trace");
}

#[cfg(feature = "bench_trace")]
fn build_grid_graph(w: usize, h: usize) -> Result<Graph, kolam::KolamError> {
    let mut g = Graph::new();
    let mut ids = Vec::with_capacity((w + 1) * (h + 1));
    for j in 0..=h {
        for i in 0..=w {
            ids.push(g.add_point(Point::new(i as f64 * 6.0, j as f64 * 6.0))?);
        }
    }
    let ix = |i: usize, j: usize| ids[j * (w + 1) + i];
    for j in 0..=h {
        for i in 0..w {
            g.add_edge(ix(i, j), ix(i + 1, j))?;
        }
    }
    for i in 0..=w {
        for j in 0..h {
            g.add_edge(ix(i, j), ix(i, j + 1))?;
        }
    }
    Ok(g)
}

#[cfg(feature = "bench_trace")]
fn main() -> Result<(), kolam::KolamError> {
    let args: Vec<String> = std::env::args().collect();
    let mut w = 70usize;
    let mut h = 70usize;
    let mut repeats = 10usize;
    for a in &args[1..] {
        if let Some(val) = a.strip_prefix("--w=") {
            if let Ok(v) = val.parse() {
                w = v;
            }
        } else if let Some(val) = a.strip_prefix("--h=") {
            if let Ok(v) = val.parse() {
                h = v;
            }
        } else if let Some(val) = a.strip_prefix("--repeats=") {
            if let Ok(v) = val.parse() {
                repeats = v;
            }
        }
    }

    let g = build_grid_graph(w, h)?;
    let style = KnotworkStyle::default();

    let mut trace_ms = Vec::with_capacity(repeats);
    let mut render_ms = Vec::with_capacity(repeats);
    let mut threads = Vec::new();
    for _ in 0..repeats.max(1) {
        let t0 = Instant::now();
        threads = trace_threads(&g)?;
        trace_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
        let t1 = Instant::now();
        let _ = render_threads(&g, &threads, &style)?;
        render_ms.push(t1.elapsed().as_secs_f64() * 1000.0);
    }
    let avg = |v: &[f64]| v.iter().sum::<f64>() / (v.len() as f64);

    println!(
        "grid={}x{} edges={} threads={} avg_trace_ms={:.3} avg_render_ms={:.3}",
        w,
        h,
        g.edge_count(),
        threads.len(),
        avg(&trace_ms),
        avg(&render_ms)
    );
    Ok(())
}
