//! Editor model behind the drawing surface.
//!
//! The board works in screen coordinates (Y grows downward). Pulli are the
//! dots, links join two pulli. Link editing is a two-click state machine: the
//! first click selects a pulli, the second one adds (or removes) the link
//! between the selection and the clicked pulli.

use serde::{Deserialize, Serialize};

use crate::geometry::limits;
use crate::{render_knotwork, Drawing, Graph, KnotworkStyle, KolamError, ParseError, Point, PointId};

/// Hit radius of a pulli, in screen units.
pub const PULLI_RADIUS: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkTool {
    Add,
    Remove,
}

/// What a link-tool click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// No pulli under the pointer; state unchanged.
    Missed,
    Selected { id: u32 },
    /// The selected pulli was clicked again.
    Deselected { id: u32 },
    Linked { a: u32, b: u32 },
    Unlinked { a: u32, b: u32 },
    /// Nothing to add or remove; the selection is kept.
    Unchanged { a: u32, b: u32 },
    /// The link could not be added (edge limit); the selection is kept.
    Refused { a: u32, b: u32 },
}

#[derive(Clone, Debug)]
pub struct Board {
    pulli: Vec<Option<Point>>, // slot index is the pulli id
    links: Vec<(u32, u32)>,    // lower endpoint first (canonical screen order)
    selected: Option<u32>,
    tool: LinkTool,
    radius: f64,
    max_links: usize,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Board::with_radius(PULLI_RADIUS)
    }

    pub fn with_radius(radius: f64) -> Self {
        Board {
            pulli: Vec::new(),
            links: Vec::new(),
            selected: None,
            tool: LinkTool::Add,
            radius,
            max_links: limits::MAX_EDGES,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    // Pulli
    /// Place a pulli. A pulli already sitting at exactly `(x, y)` is reused.
    pub fn add_pulli(&mut self, x: f64, y: f64) -> Result<u32, KolamError> {
        if !limits::in_coord_bounds(x) || !limits::in_coord_bounds(y) {
            return Err(KolamError::NonFinite { x, y });
        }
        let p = Point::new(x, y);
        if let Some(id) = self.pulli_iter().find(|(_, q)| *q == p).map(|(id, _)| id) {
            return Ok(id);
        }
        if self.pulli_count() >= limits::MAX_POINTS {
            return Err(KolamError::LimitExceeded { what: "point", max: limits::MAX_POINTS });
        }
        let id = self.pulli.len() as u32;
        self.pulli.push(Some(p));
        Ok(id)
    }

    pub fn pulli(&self, id: u32) -> Option<Point> {
        self.pulli.get(id as usize).copied().flatten()
    }

    pub fn pulli_iter(&self) -> impl Iterator<Item = (u32, Point)> + '_ {
        self.pulli
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|p| (i as u32, p)))
    }

    pub fn pulli_count(&self) -> usize {
        self.pulli.iter().filter(|p| p.is_some()).count()
    }

    /// Topmost (most recently placed) pulli within the hit radius.
    pub fn pick(&self, x: f64, y: f64) -> Option<u32> {
        let at = Point::new(x, y);
        self.pulli
            .iter()
            .enumerate()
            .rev()
            .find(|(_, p)| p.map_or(false, |p| p.distance(at) <= self.radius))
            .map(|(i, _)| i as u32)
    }

    /// Remove a pulli together with its links.
    pub fn remove_pulli(&mut self, id: u32) -> bool {
        match self.pulli.get_mut(id as usize) {
            Some(slot) if slot.is_some() => *slot = None,
            _ => return false,
        }
        self.links.retain(|&(a, b)| a != id && b != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        true
    }

    pub fn remove_pulli_at(&mut self, x: f64, y: f64) -> Option<u32> {
        let id = self.pick(x, y)?;
        self.remove_pulli(id);
        Some(id)
    }

    // Links
    fn ordered(&self, a: u32, b: u32) -> Result<(u32, u32), KolamError> {
        let pa = self.pulli(a).ok_or(KolamError::UnknownPoint(a))?;
        let pb = self.pulli(b).ok_or(KolamError::UnknownPoint(b))?;
        if a == b {
            return Err(KolamError::SelfLoop(a));
        }
        Ok(if pa.canonical_cmp(&pb).is_le() { (a, b) } else { (b, a) })
    }

    pub fn has_link(&self, a: u32, b: u32) -> bool {
        self.ordered(a, b).map_or(false, |key| self.links.contains(&key))
    }

    /// Link two pulli. `Ok(false)` when they are already linked.
    pub fn add_link(&mut self, a: u32, b: u32) -> Result<bool, KolamError> {
        let key = self.ordered(a, b)?;
        if self.links.contains(&key) {
            return Ok(false);
        }
        if self.links.len() >= self.max_links {
            return Err(KolamError::LimitExceeded { what: "edge", max: self.max_links });
        }
        self.links.push(key);
        Ok(true)
    }

    pub fn remove_link(&mut self, a: u32, b: u32) -> bool {
        let Ok(key) = self.ordered(a, b) else {
            return false;
        };
        let before = self.links.len();
        self.links.retain(|&l| l != key);
        self.links.len() != before
    }

    pub fn links(&self) -> &[(u32, u32)] {
        &self.links
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    fn click(&mut self, x: f64, y: f64, tool: LinkTool) -> ClickOutcome {
        let Some(id) = self.pick(x, y) else {
            return ClickOutcome::Missed;
        };
        let sel = match self.selected {
            Some(sel) if self.tool == tool => sel,
            _ => {
                // No selection yet, or it was made with the other tool
                self.selected = Some(id);
                self.tool = tool;
                return ClickOutcome::Selected { id };
            }
        };
        if sel == id {
            self.selected = None;
            return ClickOutcome::Deselected { id };
        }
        let changed = match tool {
            LinkTool::Add => match self.add_link(sel, id) {
                Ok(added) => added,
                Err(e) => {
                    log::warn!("link {sel}-{id} refused: {e}");
                    return ClickOutcome::Refused { a: sel, b: id };
                }
            },
            LinkTool::Remove => self.remove_link(sel, id),
        };
        if !changed {
            return ClickOutcome::Unchanged { a: sel, b: id };
        }
        self.selected = None;
        match tool {
            LinkTool::Add => ClickOutcome::Linked { a: sel, b: id },
            LinkTool::Remove => ClickOutcome::Unlinked { a: sel, b: id },
        }
    }

    pub fn link_click(&mut self, x: f64, y: f64) -> ClickOutcome {
        self.click(x, y, LinkTool::Add)
    }

    pub fn unlink_click(&mut self, x: f64, y: f64) -> ClickOutcome {
        self.click(x, y, LinkTool::Remove)
    }

    pub fn clear(&mut self) {
        self.pulli.clear();
        self.links.clear();
        self.selected = None;
        self.tool = LinkTool::Add;
    }

    // Conversion
    /// Skeleton graph in math space (Y up). Ids are renumbered densely in
    /// placement order.
    pub fn to_graph(&self) -> Result<Graph, KolamError> {
        let mut g = Graph::new();
        let mut ids: Vec<Option<PointId>> = vec![None; self.pulli.len()];
        for (id, p) in self.pulli_iter() {
            ids[id as usize] = Some(g.add_point(Point::new(p.x, -p.y))?);
        }
        for &(a, b) in &self.links {
            let ga = ids.get(a as usize).copied().flatten().ok_or(KolamError::UnknownPoint(a))?;
            let gb = ids.get(b as usize).copied().flatten().ok_or(KolamError::UnknownPoint(b))?;
            g.add_edge(ga, gb)?;
        }
        Ok(g)
    }

    pub fn knotwork(&self, style: &KnotworkStyle) -> Result<Drawing, KolamError> {
        render_knotwork(&self.to_graph()?, style)
    }

    pub fn to_text(&self) -> Result<String, KolamError> {
        Ok(self.to_graph()?.to_text())
    }

    fn replace_with(&mut self, g: &Graph) {
        let mut next = Board::with_radius(self.radius);
        next.pulli = g.points().iter().map(|p| Some(Point::new(p.x, -p.y))).collect();
        for (a, b) in g.edges() {
            // Graph edges join two distinct live points
            if let Ok(key) = next.ordered(a, b) {
                next.links.push(key);
            }
        }
        log::debug!("board loaded: {} pulli, {} links", next.pulli_count(), next.link_count());
        *self = next;
    }

    /// Replace the board with a saved line; on error the board is untouched.
    pub fn load_text(&mut self, s: &str) -> Result<(), ParseError> {
        let g = Graph::from_text(s)?;
        self.replace_with(&g);
        Ok(())
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, KolamError> {
        Ok(self.to_graph()?.to_json_value())
    }

    /// Replace the board with a JSON graph document; on error the board is
    /// untouched.
    pub fn load_json_value(&mut self, v: serde_json::Value) -> Result<(), KolamError> {
        let g = Graph::from_json_value(v)?;
        self.replace_with(&g);
        Ok(())
    }
}
