use std::cmp::Ordering;

use crate::geometry::math::polar_angle;
use crate::model::{PointId, Turn};
use crate::{Graph, KolamError};

/// Pick the vertex that follows the directed edge `u -> v`.
///
/// The neighbors of `v` sit on a ring ordered counter-clockwise by direction,
/// spokes in the same direction by adjacency slot. `Turn::Right` takes the
/// neighbor after `u` on that ring, `Turn::Left` the one before it, so each
/// turn undoes the other. A leaf bounces back to `u`.
pub fn next_vertex(g: &Graph, u: PointId, v: PointId, turn: Turn) -> Result<PointId, KolamError> {
    if !g.has_edge(u, v) {
        return Err(KolamError::MissingEdge { from: u, to: v });
    }
    let lst = g.neighbors(v);
    if lst.len() == 1 {
        return Ok(u);
    }
    if lst.iter().filter(|&&w| w == u).count() > 1 {
        return Err(KolamError::DuplicateEdge { a: u, b: v });
    }
    let pv = g.point(v).ok_or(KolamError::UnknownPoint(v))?;

    let mut ring: Vec<(f64, usize)> = Vec::with_capacity(lst.len());
    for (slot, &w) in lst.iter().enumerate() {
        let pw = g.point(w).ok_or(KolamError::UnknownPoint(w))?;
        ring.push((polar_angle(pw.sub(pv)), slot));
    }
    ring.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });
    let at = ring
        .iter()
        .position(|&(_, slot)| lst[slot] == u)
        .ok_or(KolamError::MissingEdge { from: u, to: v })?;
    let n = ring.len();
    let next = match turn {
        Turn::Right => (at + 1) % n,
        Turn::Left => (at + n - 1) % n,
    };
    Ok(lst[ring[next].1])
}
