//! Decomposition of a skeleton into closed threads.
//!
//! Each undirected edge yields two directed edges, and each directed edge is
//! walked once under each turning phase: `4 * edges` work items in total.
//! A walk alternates its turn at every step, so it closes only when it is
//! back on its seed edge with the seed turn, i.e. after an even number of
//! steps. The step map on work items is a bijection when no two edges leave
//! a vertex in the same direction, so the walks partition the items.

use serde::{Deserialize, Serialize};

use crate::algorithms::turn::next_vertex;
use crate::model::{PointId, Turn};
use crate::{Graph, KolamError};

/// One directed edge taken under one turning phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkItem {
    pub from: PointId,
    pub to: PointId,
    pub turn: Turn,
}

/// A closed walk. `path` holds the cyclic vertex sequence followed by its
/// first two vertices, so `path.windows(3)` visits every arc once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub path: Vec<PointId>,
    pub start_turn: Turn,
}

impl Thread {
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(2)
    }

    pub fn cycle(&self) -> &[PointId] {
        &self.path[..self.steps()]
    }

    pub fn turn_at(&self, step: usize) -> Turn {
        if step % 2 == 0 {
            self.start_turn
        } else {
            self.start_turn.flip()
        }
    }

    /// `(u, v, w, turn)` for every step: the walk went `u -> v` with `turn`
    /// and continued to `w`.
    pub fn triples(&self) -> impl Iterator<Item = (PointId, PointId, PointId, Turn)> + '_ {
        self.path
            .windows(3)
            .enumerate()
            .map(|(i, w)| (w[0], w[1], w[2], self.turn_at(i)))
    }

    pub fn work_items(&self) -> impl Iterator<Item = WorkItem> + '_ {
        self.triples()
            .map(|(from, to, _, turn)| WorkItem { from, to, turn })
    }
}

/// Lazily traces threads in a fixed seed order.
///
/// Each call to `next` runs one walk to completion, so dropping the tracer
/// between threads is the only way to stop early.
pub struct Tracer<'g> {
    graph: &'g Graph,
    offsets: Vec<usize>,      // first half-edge slot of each point
    items: Vec<WorkItem>,     // indexed by (offset + slot) * 2 + turn
    consumed: Vec<bool>,
    order: Vec<usize>,        // seed order over item indices
    cursor: usize,
    remaining: usize,
    failed: bool,
}

impl<'g> Tracer<'g> {
    pub fn new(graph: &'g Graph) -> Result<Self, KolamError> {
        graph.check_simple()?;
        let mut offsets = Vec::with_capacity(graph.point_count());
        let mut items = Vec::with_capacity(4 * graph.edge_count());
        let mut slot = 0usize;
        for (u, lst) in graph.adjacency.iter().enumerate() {
            offsets.push(slot);
            for &v in lst {
                for turn in [Turn::Right, Turn::Left] {
                    items.push(WorkItem { from: u as PointId, to: v, turn });
                }
            }
            slot += lst.len();
        }
        // Canonical coordinates first so the grouping into threads (and the
        // colors that follow it) does not depend on insertion order
        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by(|&i, &j| {
            let (a, b) = (items[i], items[j]);
            graph.points[a.from as usize]
                .canonical_cmp(&graph.points[b.from as usize])
                .then_with(|| graph.points[a.to as usize].canonical_cmp(&graph.points[b.to as usize]))
                .then(a.turn.cmp(&b.turn))
        });
        let remaining = items.len();
        Ok(Tracer {
            graph,
            offsets,
            consumed: vec![false; items.len()],
            items,
            order,
            cursor: 0,
            remaining,
            failed: false,
        })
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn item_index(&self, from: PointId, to: PointId, turn: Turn) -> Result<usize, KolamError> {
        let k = self
            .graph
            .neighbors(from)
            .iter()
            .position(|&w| w == to)
            .ok_or(KolamError::MissingEdge { from, to })?;
        Ok((self.offsets[from as usize] + k) * 2 + turn as usize)
    }

    fn consume(&mut self, item: WorkItem) -> Result<(), KolamError> {
        let idx = self.item_index(item.from, item.to, item.turn)?;
        if self.consumed[idx] {
            return Err(KolamError::Invariant(item));
        }
        self.consumed[idx] = true;
        self.remaining -= 1;
        Ok(())
    }

    fn walk(&mut self, seed: WorkItem) -> Result<Thread, KolamError> {
        let mut path = vec![seed.from];
        let (mut u, mut v, mut turn) = (seed.from, seed.to, seed.turn);
        loop {
            self.consume(WorkItem { from: u, to: v, turn })?;
            let w = next_vertex(self.graph, u, v, turn)?;
            path.push(v);
            u = v;
            v = w;
            turn = turn.flip();
            // Back on the seed edge after an odd number of steps means the
            // other phase of that edge: keep walking
            if u == seed.from && v == seed.to && turn == seed.turn {
                break;
            }
        }
        path.push(seed.to);
        Ok(Thread { path, start_turn: seed.turn })
    }
}

impl Iterator for Tracer<'_> {
    type Item = Result<Thread, KolamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        while self.cursor < self.order.len() && self.consumed[self.order[self.cursor]] {
            self.cursor += 1;
        }
        let seed = self.items[*self.order.get(self.cursor)?];
        let res = self.walk(seed);
        match &res {
            Ok(t) => log::trace!("thread of {} steps from {:?}", t.steps(), seed),
            Err(e) => {
                log::debug!("tracing stopped: {e}");
                self.failed = true;
            }
        }
        Some(res)
    }
}

/// Trace every thread of `g`.
pub fn trace_threads(g: &Graph) -> Result<Vec<Thread>, KolamError> {
    let tracer = Tracer::new(g)?;
    let total = tracer.total_items();
    let threads = tracer.collect::<Result<Vec<_>, _>>()?;
    log::debug!("traced {} threads over {} work items", threads.len(), total);
    Ok(threads)
}
