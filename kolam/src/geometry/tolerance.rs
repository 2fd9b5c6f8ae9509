// Centralized tolerances and helpers for knotwork geometry

pub const EPS_LEN: f64 = 1e-12;           // zero-length vector threshold
pub const EPS_DIST: f64 = 1e-14;          // mid-to-mid distance treated as a bounce

// Curve sampling default (parameter steps across [0, 1], inclusive)
pub const DEFAULT_SAMPLES: usize = 100;

#[inline] pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool { (a - b).abs() <= eps }
