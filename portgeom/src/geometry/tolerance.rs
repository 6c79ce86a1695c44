// Centralized tolerances and angle helpers for boundary geometry

use std::f64::consts::{PI, TAU};

pub const EPS_DET: f64 = 1e-6;            // ray/edge parallel threshold
pub const EPS_LEN: f64 = 1e-12;           // zero-length direction threshold
pub const EPS_PARAM: f64 = 1e-9;          // slack on edge parameter u in [0,1]
pub const EPS_ANG: f64 = 1e-9;            // angle compare slack (radians)

#[inline] pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool { (a - b).abs() <= eps }

/// Normalize an angle into `[0, 2π)`. NaN and infinities map to 0.
pub fn normalize_angle(a: f64) -> f64 {
    if !a.is_finite() { return 0.0; }
    let r = a.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if r >= TAU { 0.0 } else { r }
}

/// Smallest signed difference `a - b` wrapped into `(-π, π]`.
pub fn angle_delta(a: f64, b: f64) -> f64 {
    let d = normalize_angle(a - b);
    if d > PI { d - TAU } else { d }
}

#[inline] pub fn to_degrees(rad: f64) -> f64 { rad * 180.0 / PI }
#[inline] pub fn from_degrees(deg: f64) -> f64 { deg * PI / 180.0 }

#[inline]
pub fn norm2(x: f64, y: f64) -> Option<((f64, f64), f64)> {
    let len = x.hypot(y);
    if len > EPS_LEN && len.is_finite() { Some(((x / len, y / len), len)) } else { None }
}
