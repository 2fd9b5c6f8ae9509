//! Cubic curve utilities for knotwork arcs.
//!
//! Every arc is a cubic from one edge midpoint to the next. It can be built
//! either as a Bézier (control points) or as a Hermite (endpoint tangents);
//! both are modulated by the cosine between the two offset directions.

use serde::{Deserialize, Serialize};

use crate::geometry::math::unit_params;
use crate::model::Point;

/// Control points of a cubic Bézier curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub p0: Point, // Start point
    pub p1: Point, // First control point
    pub p2: Point, // Second control point
    pub p3: Point, // End point
}

impl CubicBezier {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the curve at parameter t ∈ [0, 1].
    pub fn eval(&self, t: f64) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        Point {
            x: mt3 * self.p0.x + 3.0 * mt2 * t * self.p1.x + 3.0 * mt * t2 * self.p2.x + t3 * self.p3.x,
            y: mt3 * self.p0.y + 3.0 * mt2 * t * self.p1.y + 3.0 * mt * t2 * self.p2.y + t3 * self.p3.y,
        }
    }

    /// Evaluate the tangent (derivative) at parameter t.
    pub fn tangent(&self, t: f64) -> Point {
        let t2 = t * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;

        Point {
            x: 3.0 * mt2 * (self.p1.x - self.p0.x)
                + 6.0 * mt * t * (self.p2.x - self.p1.x)
                + 3.0 * t2 * (self.p3.x - self.p2.x),
            y: 3.0 * mt2 * (self.p1.y - self.p0.y)
                + 6.0 * mt * t * (self.p2.y - self.p1.y)
                + 3.0 * t2 * (self.p3.y - self.p2.y),
        }
    }
}

/// Cubic Hermite segment: endpoints plus endpoint tangents.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicHermite {
    pub p0: Point,
    pub m0: Point,
    pub p1: Point,
    pub m1: Point,
}

impl CubicHermite {
    pub fn new(p0: Point, m0: Point, p1: Point, m1: Point) -> Self {
        Self { p0, m0, p1, m1 }
    }

    pub fn eval(&self, t: f64) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;
        self.p0
            .scale(h00)
            .add(self.m0.scale(h10))
            .add(self.p1.scale(h01))
            .add(self.m1.scale(h11))
    }

    /// Same curve in Bézier form.
    pub fn to_bezier(&self) -> CubicBezier {
        CubicBezier::new(
            self.p0,
            self.p0.add(self.m0.scale(1.0 / 3.0)),
            self.p1.sub(self.m1.scale(1.0 / 3.0)),
            self.p1,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Bezier,
    Hermite,
}

/// The parametric curve behind one knotwork arc.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ArcCurve {
    Bezier(CubicBezier),
    Hermite(CubicHermite),
}

impl ArcCurve {
    /// Build an arc from `start` to `end` whose raw offsets are `off0` (at the
    /// start) and `off1` (at the end). `cos` is the cosine between the two
    /// offset directions; offsets are scaled by `1 + cos`, which rounds arcs
    /// at gentle turns and sharpens them where the strand folds back.
    pub fn knot_arc(mode: Interpolation, start: Point, off0: Point, end: Point, off1: Point, cos: f64) -> ArcCurve {
        let k = 1.0 + cos;
        match mode {
            Interpolation::Bezier => ArcCurve::Bezier(CubicBezier::new(
                start,
                start.add(off0.scale(k)),
                end.add(off1.scale(k)),
                end,
            )),
            Interpolation::Hermite => ArcCurve::Hermite(CubicHermite::new(
                start,
                off0.scale(4.0 * k),
                end,
                off1.scale(-4.0 * k),
            )),
        }
    }

    pub fn eval(&self, t: f64) -> Point {
        match self {
            ArcCurve::Bezier(c) => c.eval(t),
            ArcCurve::Hermite(c) => c.eval(t),
        }
    }

    pub fn to_bezier(&self) -> CubicBezier {
        match self {
            ArcCurve::Bezier(c) => *c,
            ArcCurve::Hermite(c) => c.to_bezier(),
        }
    }

    /// Polyline through `samples` evenly spaced parameters, endpoints included.
    pub fn sample(&self, samples: usize) -> Vec<Point> {
        unit_params(samples).map(|t| self.eval(t)).collect()
    }
}
