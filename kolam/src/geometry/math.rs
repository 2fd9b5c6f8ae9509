use std::f64::consts::TAU;

use crate::model::Point;

/// Counter-clockwise angle of `v` from the positive x axis, in `[0, 2π)`.
///
/// `v` need not be normalized, which keeps spokes in exactly the same
/// direction on exactly the same angle.
pub fn polar_angle(v: Point) -> f64 {
    let mut ang = v.y.atan2(v.x);
    if ang < 0.0 {
        ang += TAU;
    }
    // A tiny negative angle can round up to exactly TAU
    if ang >= TAU {
        ang -= TAU;
    }
    ang
}

/// Evenly spaced parameters over `[0, 1]`, endpoints included.
pub fn unit_params(samples: usize) -> impl Iterator<Item = f64> {
    let last = samples.saturating_sub(1).max(1) as f64;
    (0..samples).map(move |i| i as f64 / last)
}
