// Regular polygon vertex generation. Vertex 0 sits at the top (-90°) and the
// sequence advances clockwise on screen (y down), so edge i joins vertex i and i+1.

use super::limits::clamp_sides;
use crate::model::{Shape, Vec2};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Angle of vertex `i` of an `n`-gon (radians, may be negative).
#[inline]
pub fn vertex_angle(i: u32, n: u32) -> f64 { -FRAC_PI_2 + TAU * (i as f64) / (n as f64) }

/// Angle of the outward normal through the midpoint of edge `i`.
#[inline]
pub fn edge_midpoint_angle(i: u32, n: u32) -> f64 { -FRAC_PI_2 + TAU * (i as f64 + 0.5) / (n as f64) }

pub fn polygon_vertices(sides: u32, radius: f64) -> Vec<Vec2> {
    let n = clamp_sides(sides);
    (0..n)
        .map(|i| {
            let a = vertex_angle(i, n);
            Vec2 { x: radius * a.cos(), y: radius * a.sin() }
        })
        .collect()
}

/// Discrete outline; circles use `circle_segments` vertices.
pub fn shape_vertices(shape: &Shape, radius: f64, circle_segments: u32) -> Vec<Vec2> {
    match shape.sides() {
        Some(n) => polygon_vertices(n, radius),
        None => polygon_vertices(circle_segments, radius),
    }
}

/// Endpoints of edge `i` (wrapped modulo the side count).
pub fn edge_endpoints(verts: &[Vec2], i: u32) -> Option<(Vec2, Vec2)> {
    let n = verts.len();
    if n < 2 { return None; }
    let i = i as usize % n;
    Some((verts[i], verts[(i + 1) % n]))
}
