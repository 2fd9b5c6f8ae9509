//! Rendering of threads as interlacing cubic arcs.
//!
//! Every step `u -> v -> w` of a thread becomes one arc from the midpoint of
//! `uv` to the midpoint of `vw`, bulging around `v`. The offsets leave each
//! midpoint at 45 degrees to the edge, on alternating sides from one arc to
//! the next, which is what makes strands cross over and under at every edge.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::threads::{trace_threads, Thread};
use crate::geometry::cubic::{ArcCurve, Interpolation};
use crate::geometry::limits::MAX_SAMPLES;
use crate::geometry::tolerance::{DEFAULT_SAMPLES, EPS_DIST};
use crate::model::{Color, Point, PointId, Segment, Turn};
use crate::{Graph, KolamError, ParseError, ParseErrorKind};

/// Finite list of colors, cycled with wraparound.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(pub Vec<Color>);

impl Default for Palette {
    fn default() -> Self {
        Palette::xkcd()
    }
}

impl Palette {
    /// purple, green, blue, pink, brown, red, teal, orange, magenta, yellow
    pub fn xkcd() -> Self {
        Palette(vec![
            Color::rgb(0x7e, 0x1e, 0x9c),
            Color::rgb(0x15, 0xb0, 0x1a),
            Color::rgb(0x03, 0x43, 0xdf),
            Color::rgb(0xff, 0x81, 0xc0),
            Color::rgb(0x65, 0x37, 0x00),
            Color::rgb(0xe5, 0x00, 0x00),
            Color::rgb(0x02, 0x93, 0x86),
            Color::rgb(0xf9, 0x73, 0x06),
            Color::rgb(0xc2, 0x00, 0x78),
            Color::rgb(0xff, 0xff, 0x14),
        ])
    }

    /// Deterministic permutation of the palette for `seed`.
    pub fn shuffled(&self, seed: u64) -> Palette {
        let mut colors = self.0.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        colors.shuffle(&mut rng);
        Palette(colors)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Color for slot `i`; callers guarantee the palette is not empty.
    pub fn color(&self, i: usize) -> Color {
        self.0[i % self.0.len()]
    }
}

/// Rendering options. Every field has a default, so partial JSON works.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnotworkStyle {
    pub interpolation: Interpolation,
    /// Offset length as a fraction of the midpoint-to-midpoint distance.
    pub spread: f64,
    /// Size of the loop drawn where a thread bounces off a leaf, relative
    /// to the leaf edge.
    pub loop_size: f64,
    pub samples: usize,
    pub color_each_thread: bool,
    pub color_each_arc: bool,
    pub palette: Palette,
    pub palette_seed: Option<u64>,
    /// Draw a small loop on points with no edges; `None` skips them.
    pub isolated_loop_radius: Option<f64>,
}

impl Default for KnotworkStyle {
    fn default() -> Self {
        KnotworkStyle {
            interpolation: Interpolation::Bezier,
            spread: 0.5,
            loop_size: 1.0,
            samples: DEFAULT_SAMPLES,
            color_each_thread: true,
            color_each_arc: false,
            palette: Palette::default(),
            palette_seed: None,
            isolated_loop_radius: None,
        }
    }
}

impl KnotworkStyle {
    pub fn from_json_str(s: &str) -> Result<Self, KolamError> {
        let style: KnotworkStyle = serde_json::from_str(s)
            .map_err(|e| ParseError::new(0, ParseErrorKind::Document(e.to_string())))?;
        style.validate()?;
        Ok(style)
    }

    pub fn validate(&self) -> Result<(), KolamError> {
        if !self.spread.is_finite() || self.spread <= 0.0 {
            return Err(KolamError::InvalidStyle("spread must be finite and positive"));
        }
        if !self.loop_size.is_finite() || self.loop_size < 0.0 {
            return Err(KolamError::InvalidStyle("loop_size must be finite and non-negative"));
        }
        if self.samples < 2 || self.samples > MAX_SAMPLES {
            return Err(KolamError::InvalidStyle("samples out of range"));
        }
        if self.palette.is_empty() {
            return Err(KolamError::InvalidStyle("palette is empty"));
        }
        if let Some(r) = self.isolated_loop_radius {
            if !r.is_finite() || r <= 0.0 {
                return Err(KolamError::InvalidStyle("isolated_loop_radius must be finite and positive"));
            }
        }
        Ok(())
    }

    fn effective_palette(&self) -> Palette {
        match self.palette_seed {
            Some(seed) => self.palette.shuffled(seed),
            None => self.palette.clone(),
        }
    }
}

/// One sampled, colored knotwork arc.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    /// Index of the thread (isolated-point loops come after all threads).
    pub thread: usize,
    pub step: usize,
    pub color: Color,
    pub curve: ArcCurve,
    pub points: Vec<Point>,
}

/// Everything the display layer needs: dots, the debug skeleton and the arcs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub markers: Vec<Point>,
    pub skeleton: Vec<Segment>,
    pub arcs: Vec<Arc>,
}

impl Drawing {
    pub fn thread_count(&self) -> usize {
        self.arcs.last().map_or(0, |a| a.thread + 1)
    }

    /// (min, max) corners over markers and sampled arcs.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut it = self
            .markers
            .iter()
            .chain(self.arcs.iter().flat_map(|a| a.points.iter()));
        let first = *it.next()?;
        let (mut lo, mut hi) = (first, first);
        for p in it {
            lo = Point::new(lo.x.min(p.x), lo.y.min(p.y));
            hi = Point::new(hi.x.max(p.x), hi.y.max(p.y));
        }
        Some((lo, hi))
    }

    pub fn to_svg_paths(&self) -> Vec<String> {
        crate::svg::to_svg_paths_impl(self)
    }

    pub fn to_svg_document(&self, stroke_width: f64, show_skeleton: bool) -> String {
        crate::svg::to_svg_document_impl(self, stroke_width, show_skeleton)
    }
}

fn point_of(g: &Graph, id: PointId) -> Result<Point, KolamError> {
    g.point(id).ok_or(KolamError::UnknownPoint(id))
}

fn step_arc(g: &Graph, u: PointId, v: PointId, w: PointId, turn: Turn, style: &KnotworkStyle) -> Result<ArcCurve, KolamError> {
    let (pu, pv, pw) = (point_of(g, u)?, point_of(g, v)?, point_of(g, w)?);
    let mid1 = pu.midpoint(pv);
    let mid2 = pv.midpoint(pw);
    let mut dist = mid1.distance(mid2);
    if dist <= EPS_DIST {
        // Bounce at a leaf: both midpoints coincide
        dist = style.loop_size / style.spread * pv.distance(pu);
    }
    // The sense follows the item's turn, so an arc looks the same whichever
    // item seeded its thread
    let clockwise = turn == Turn::Left;
    let n1 = pv.sub(pu).normalized()?.rotate_45(clockwise);
    let n2 = pv.sub(pw).normalized()?.rotate_45(!clockwise);
    let reach = style.spread * dist;
    let cos = n1.dot(n2);
    Ok(ArcCurve::knot_arc(
        style.interpolation,
        mid1,
        n1.scale(reach),
        mid2,
        n2.scale(reach),
        cos,
    ))
}

fn isolated_loop(center: Point, radius: f64) -> [ArcCurve; 2] {
    let right = Point::new(center.x + radius / 2.0, center.y);
    let left = Point::new(center.x - radius / 2.0, center.y);
    let up = Point::new(0.0, 4.0 / 3.0 * radius / 2.0);
    let down = up.negate();
    [
        ArcCurve::knot_arc(Interpolation::Bezier, right, up, left, up, 0.0),
        ArcCurve::knot_arc(Interpolation::Bezier, left, down, right, down, 0.0),
    ]
}

/// Render already traced threads of `g`.
pub fn render_threads(g: &Graph, threads: &[Thread], style: &KnotworkStyle) -> Result<Drawing, KolamError> {
    style.validate()?;
    let palette = style.effective_palette();
    let mut slot = 0usize;
    let mut arcs = Vec::new();

    for (ti, thread) in threads.iter().enumerate() {
        for (step, (u, v, w, turn)) in thread.triples().enumerate() {
            let curve = step_arc(g, u, v, w, turn, style)?;
            arcs.push(Arc {
                thread: ti,
                step,
                color: palette.color(slot),
                points: curve.sample(style.samples),
                curve,
            });
            if style.color_each_arc {
                slot += 1;
            }
        }
        if style.color_each_thread {
            slot += 1;
        }
    }

    if let Some(radius) = style.isolated_loop_radius {
        let mut ti = threads.len();
        for (id, p) in g.points().iter().enumerate() {
            if g.degree(id as PointId) != 0 {
                continue;
            }
            for (step, curve) in isolated_loop(*p, radius).into_iter().enumerate() {
                arcs.push(Arc {
                    thread: ti,
                    step,
                    color: palette.color(slot),
                    points: curve.sample(style.samples),
                    curve,
                });
                if style.color_each_arc {
                    slot += 1;
                }
            }
            if style.color_each_thread {
                slot += 1;
            }
            ti += 1;
        }
    }

    let skeleton = g
        .edges()
        .into_iter()
        .map(|(a, b)| Ok(Segment { a: point_of(g, a)?, b: point_of(g, b)? }))
        .collect::<Result<Vec<_>, KolamError>>()?;

    log::debug!("rendered {} arcs for {} threads", arcs.len(), threads.len());
    Ok(Drawing {
        markers: g.points().to_vec(),
        skeleton,
        arcs,
    })
}

/// Trace and render `g` in one go.
pub fn render_knotwork(g: &Graph, style: &KnotworkStyle) -> Result<Drawing, KolamError> {
    let threads = trace_threads(g)?;
    render_threads(g, &threads, style)
}
