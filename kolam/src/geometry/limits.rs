// Centralized ingestion limits to harden against untrusted input (text/JSON/board)

// Graph size caps
pub const MAX_POINTS: usize = 100_000;
pub const MAX_EDGES: usize = 300_000;

// Text format caps
pub const MAX_TEXT_BYTES: usize = 16 * 1024 * 1024;
pub const MAX_TEXT_TOKENS: usize = 2 * MAX_EDGES + MAX_POINTS;

// Rendering caps
pub const MAX_SAMPLES: usize = 10_000;

// Numeric bounds
pub const COORD_MIN: f64 = -1.0e12;
pub const COORD_MAX: f64 =  1.0e12;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }
