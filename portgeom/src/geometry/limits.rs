// Centralized caps to harden against untrusted input (JSON/JS callers)

// Shapes
pub const MIN_POLYGON_SIDES: u32 = 3;
pub const MAX_POLYGON_SIDES: u32 = 1024;

// Resolution of the discretized circle when a vertex list is needed
pub const CIRCLE_SEGMENTS: u32 = 32;

// Layout
pub const MAX_HANDLES_PER_SIDE: usize = 256;

// Numeric bounds for pointer coordinates (px)
pub const COORD_MIN: f64 = -10_000_000.0;
pub const COORD_MAX: f64 =  10_000_000.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn clamp_sides(sides: u32) -> u32 { sides.max(MIN_POLYGON_SIDES).min(MAX_POLYGON_SIDES) }
