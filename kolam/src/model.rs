use std::cmp::Ordering;
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::tolerance::EPS_LEN;
use crate::KolamError;

/// Index of a point in a [`crate::Graph`] arena.
pub type PointId = u32;

/// Immutable 2D point, also used as a free vector.
///
/// Equality is exact on both coordinates; there is no epsilon slack.
/// Use [`Point::key`] when a hashable identity is needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Exact bit pattern of a point, hashable. `-0.0` is folded into `0.0` so that
/// keys agree with `==` on finite coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey(u64, u64);

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn key(&self) -> PointKey {
        PointKey((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }

    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }

    pub fn negate(self) -> Point {
        Point::new(-self.x, -self.y)
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product; positive when `other` lies
    /// counter-clockwise of `self`.
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Point) -> f64 {
        self.sub(other).norm()
    }

    pub fn midpoint(self, other: Point) -> Point {
        self.add(other).scale(0.5)
    }

    /// Unit vector in the same direction.
    pub fn normalized(self) -> Result<Point, KolamError> {
        let len = self.norm();
        if len <= EPS_LEN || !len.is_finite() {
            return Err(KolamError::ZeroLength);
        }
        Ok(Point::new(self.x / len, self.y / len))
    }

    /// Rotate by 45 degrees. `clockwise` picks the sense used for the
    /// over/under alternation of knotwork arcs.
    pub fn rotate_45(self, clockwise: bool) -> Point {
        let b = FRAC_1_SQRT_2;
        if clockwise {
            Point::new(b * (self.x - self.y), b * (self.x + self.y))
        } else {
            Point::new(b * (self.x + self.y), b * (self.y - self.x))
        }
    }

    /// Lexicographic order on `(x, y)`, total over all floats.
    pub fn canonical_cmp(&self, other: &Point) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.x.partial_cmp(&other.x)? {
            Ordering::Equal => self.y.partial_cmp(&other.y),
            ord => Some(ord),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})",
            crate::text::format_coordinate(self.x),
            crate::text::format_coordinate(self.y)
        )
    }
}

/// Turning preference applied at one step of a walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    Right = 0,
    Left = 1,
}

impl Turn {
    pub fn flip(self) -> Turn {
        match self {
            Turn::Right => Turn::Left,
            Turn::Left => Turn::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Plain straight skeleton edge, for the debug view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}
