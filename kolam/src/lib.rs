pub mod model;
pub mod board;
pub mod error;
pub mod geometry {
    pub mod cubic;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod knotwork;
    pub mod threads;
    pub mod turn;
}
pub mod text;
mod json;
mod svg;

pub use algorithms::knotwork::{render_knotwork, render_threads, Arc, Drawing, KnotworkStyle, Palette};
pub use algorithms::threads::{trace_threads, Thread, Tracer, WorkItem};
pub use algorithms::turn::next_vertex;
pub use board::{Board, ClickOutcome, LinkTool, PULLI_RADIUS};
pub use error::{KolamError, ParseError, ParseErrorKind};
pub use geometry::cubic::{ArcCurve, Interpolation};
pub use model::{Color, Point, PointId, Segment, Turn};

use geometry::limits;
use model::PointKey;
use std::collections::HashMap;

/// Skeleton graph: an arena of points plus an undirected adjacency relation
/// stored as mutual directed links.
///
/// Points are deduplicated by exact coordinates on insertion (the first
/// insertion keeps its id). Adjacency lists keep insertion order, which is
/// also the tie-break order of the turn selector.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub(crate) points: Vec<Point>,            // id is index
    pub(crate) adjacency: Vec<Vec<PointId>>,  // parallel to points
    pub(crate) index: HashMap<PointKey, PointId>,
    pub(crate) edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    pub fn with_points<I: IntoIterator<Item = Point>>(points: I) -> Result<Self, KolamError> {
        let mut g = Graph::new();
        for p in points {
            g.add_point(p)?;
        }
        Ok(g)
    }

    /// Build a graph from a point list and index pairs into that list.
    /// Nothing is returned unless every point and edge is valid.
    pub fn from_parts(points: &[Point], edges: &[(usize, usize)]) -> Result<Self, KolamError> {
        let mut g = Graph::new();
        let mut ids = Vec::with_capacity(points.len());
        for &p in points {
            ids.push(g.add_point(p)?);
        }
        for &(a, b) in edges {
            let ua = *ids.get(a).ok_or(KolamError::UnknownPoint(a as PointId))?;
            let ub = *ids.get(b).ok_or(KolamError::UnknownPoint(b as PointId))?;
            g.add_edge(ua, ub)?;
        }
        Ok(g)
    }

    // Points
    pub fn add_point(&mut self, p: Point) -> Result<PointId, KolamError> {
        if !limits::in_coord_bounds(p.x) || !limits::in_coord_bounds(p.y) {
            return Err(KolamError::NonFinite { x: p.x, y: p.y });
        }
        if let Some(&id) = self.index.get(&p.key()) {
            return Ok(id);
        }
        if self.points.len() >= limits::MAX_POINTS {
            return Err(KolamError::LimitExceeded { what: "point", max: limits::MAX_POINTS });
        }
        let id = self.points.len() as PointId;
        self.points.push(p);
        self.adjacency.push(Vec::new());
        self.index.insert(p.key(), id);
        Ok(id)
    }
    pub fn point(&self, id: PointId) -> Option<Point> {
        self.points.get(id as usize).copied()
    }
    pub fn find_point(&self, p: Point) -> Option<PointId> {
        self.index.get(&p.key()).copied()
    }
    pub fn points(&self) -> &[Point] {
        &self.points
    }
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    // Edges
    /// Link `a` and `b` in both directions. Duplicates are not rejected here;
    /// check with [`Graph::has_edge`] first if they are unwanted.
    pub fn add_edge(&mut self, a: PointId, b: PointId) -> Result<(), KolamError> {
        let pa = self.point(a).ok_or(KolamError::UnknownPoint(a))?;
        let pb = self.point(b).ok_or(KolamError::UnknownPoint(b))?;
        if a == b {
            return Err(KolamError::SelfLoop(a));
        }
        if pa.sub(pb).normalized().is_err() {
            return Err(KolamError::ZeroLengthEdge { x: pa.x, y: pa.y });
        }
        if self.edge_count >= limits::MAX_EDGES {
            return Err(KolamError::LimitExceeded { what: "edge", max: limits::MAX_EDGES });
        }
        self.adjacency[a as usize].push(b);
        self.adjacency[b as usize].push(a);
        self.edge_count += 1;
        Ok(())
    }
    /// Insert both endpoints (deduplicated) and the edge between them.
    pub fn add_segment(&mut self, p: Point, q: Point) -> Result<(PointId, PointId), KolamError> {
        if p.sub(q).normalized().is_err() {
            return Err(KolamError::ZeroLengthEdge { x: p.x, y: p.y });
        }
        let a = self.add_point(p)?;
        let b = self.add_point(q)?;
        self.add_edge(a, b)?;
        Ok((a, b))
    }
    pub fn has_edge(&self, a: PointId, b: PointId) -> bool {
        self.adjacency
            .get(a as usize)
            .map_or(false, |lst| lst.contains(&b))
    }
    pub fn neighbors(&self, id: PointId) -> &[PointId] {
        self.adjacency
            .get(id as usize)
            .map_or(&[][..], |lst| lst.as_slice())
    }
    pub fn degree(&self, id: PointId) -> usize {
        self.neighbors(id).len()
    }
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Every undirected edge once, as `(u, v)` with `u` before `v` in the
    /// canonical point order. Parallel copies are each reported.
    pub fn edges(&self) -> Vec<(PointId, PointId)> {
        let mut out = Vec::with_capacity(self.edge_count);
        for (u, lst) in self.adjacency.iter().enumerate() {
            let pu = self.points[u];
            for &v in lst {
                if pu.canonical_cmp(&self.points[v as usize]).is_lt() {
                    out.push((u as PointId, v));
                }
            }
        }
        out
    }

    /// Fails with the first repeated undirected edge, if any.
    pub fn check_simple(&self) -> Result<(), KolamError> {
        for (u, lst) in self.adjacency.iter().enumerate() {
            let mut seen: Vec<PointId> = lst.clone();
            seen.sort_unstable();
            if let Some(w) = seen.windows(2).find(|w| w[0] == w[1]) {
                return Err(KolamError::DuplicateEdge { a: u as PointId, b: w[0] });
            }
        }
        Ok(())
    }
    pub fn is_simple(&self) -> bool {
        self.check_simple().is_ok()
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }
    pub fn from_json_value(v: serde_json::Value) -> Result<Graph, KolamError> {
        json::from_json_impl(v)
    }

    /// Canonical one-line text form, see [`text`].
    pub fn to_text(&self) -> String {
        text::to_text_impl(self)
    }
    pub fn from_text(s: &str) -> Result<Graph, ParseError> {
        text::from_text_impl(s)
    }
}
