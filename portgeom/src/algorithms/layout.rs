// Default fan-out of handles along one logical side of a node.

use crate::geometry::limits::{clamp_sides, CIRCLE_SEGMENTS, MAX_HANDLES_PER_SIDE};
use crate::geometry::tolerance::{angle_delta, normalize_angle, EPS_ANG};
use crate::geometry::vertices::{edge_endpoints, edge_midpoint_angle, polygon_vertices, vertex_angle};
use crate::model::{LayoutSide, Shape};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

pub const DEFAULT_PADDING_RATIO: f64 = 0.1;

/// Padding outside `[0, 0.5)` or non-finite falls back to the default.
#[inline]
pub fn sanitize_padding(p: f64) -> f64 {
    if p.is_finite() && (0.0..0.5).contains(&p) { p } else { DEFAULT_PADDING_RATIO }
}

/// Position along a side for handle `index` of `total`: midpoint for a single
/// handle, otherwise evenly over `[p, 1-p]`.
pub fn side_ratio(index: usize, total: usize, padding: f64) -> f64 {
    if total <= 1 { return 0.5; }
    let p = sanitize_padding(padding);
    let step = (1.0 - 2.0 * p) / (total - 1) as f64;
    p + index.min(total - 1) as f64 * step
}

/// Polygon edge facing `target` most directly. Ties keep the lowest index.
pub fn nearest_edge(sides: u32, target: f64) -> u32 {
    let mut best = 0u32;
    let mut best_d = f64::INFINITY;
    for i in 0..sides {
        let d = angle_delta(edge_midpoint_angle(i, sides), target).abs();
        if d < best_d - EPS_ANG {
            best = i;
            best_d = d;
        }
    }
    best
}

/// Polygon edge index a logical side resolves to.
pub fn resolve_edge(side: LayoutSide, sides: u32) -> Option<u32> {
    match side {
        LayoutSide::Left => Some(nearest_edge(sides, PI)),
        LayoutSide::Right => Some(nearest_edge(sides, 0.0)),
        LayoutSide::Edge(i) => Some(i % sides),
        LayoutSide::Around => None,
    }
}

/// Angle for handle `index` of `total` placed on `side`. `circle_segments` only
/// matters for `Edge(i)` on a circle.
pub fn angle_for_side(
    side: LayoutSide,
    index: usize,
    total: usize,
    shape: &Shape,
    padding: f64,
    circle_segments: u32,
) -> f64 {
    let total = total.max(1);
    if side == LayoutSide::Around {
        return normalize_angle(TAU * index as f64 / total as f64);
    }
    let ratio = side_ratio(index, total, padding);
    match shape.sides() {
        None => {
            let (start, end) = circle_arc(side, circle_segments);
            normalize_angle(start + ratio * (end - start))
        }
        Some(n) => {
            let verts = polygon_vertices(n, 1.0);
            let edge = resolve_edge(side, n).unwrap_or(0);
            match edge_endpoints(&verts, edge) {
                Some((v1, v2)) => {
                    let p = v1.lerp(v2, ratio);
                    normalize_angle(p.y.atan2(p.x))
                }
                None => 0.0,
            }
        }
    }
}

// Circle sides are arcs: right half, left half, or one segment of the approximation.
fn circle_arc(side: LayoutSide, circle_segments: u32) -> (f64, f64) {
    match side {
        LayoutSide::Right => (-FRAC_PI_2, FRAC_PI_2),
        LayoutSide::Left => (FRAC_PI_2, 1.5 * PI),
        LayoutSide::Edge(i) => {
            let n = clamp_sides(circle_segments);
            let i = i % n;
            (vertex_angle(i, n), vertex_angle(i + 1, n))
        }
        LayoutSide::Around => (0.0, TAU),
    }
}

/// `count` evenly spaced angles on `side`, never on a corner.
pub fn default_angles(count: usize, side: LayoutSide, shape: &Shape, padding: f64) -> Vec<f64> {
    default_angles_with(count, side, shape, padding, CIRCLE_SEGMENTS)
}

/// Like [`default_angles`] with an explicit circle resolution.
pub fn default_angles_with(count: usize, side: LayoutSide, shape: &Shape, padding: f64, circle_segments: u32) -> Vec<f64> {
    let count = if count > MAX_HANDLES_PER_SIDE {
        log::warn!("default_angles: count {} capped at {}", count, MAX_HANDLES_PER_SIDE);
        MAX_HANDLES_PER_SIDE
    } else {
        count
    };
    (0..count).map(|i| angle_for_side(side, i, count, shape, padding, circle_segments)).collect()
}

/// Angle of the middle of `side` (what a single handle gets).
pub fn side_midpoint_angle(side: LayoutSide, shape: &Shape) -> f64 {
    angle_for_side(side, 0, 1, shape, DEFAULT_PADDING_RATIO, CIRCLE_SEGMENTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: f64, b: f64) -> bool { angle_delta(a, b).abs() < 1e-9 }

    #[test]
    fn single_handle_sits_mid_side() {
        let hex = Shape::Polygon { sides: 6 };
        assert!(near(default_angles(1, LayoutSide::Left, &hex, 0.1)[0], PI));
        assert!(near(default_angles(1, LayoutSide::Right, &hex, 0.1)[0], 0.0));
        assert!(near(default_angles(1, LayoutSide::Right, &Shape::Circle, 0.1)[0], 0.0));
        assert!(near(default_angles(1, LayoutSide::Left, &Shape::Circle, 0.1)[0], PI));
    }

    #[test]
    fn hexagon_sides_resolve_to_vertical_edges() {
        assert_eq!(resolve_edge(LayoutSide::Left, 6), Some(4));
        assert_eq!(resolve_edge(LayoutSide::Right, 6), Some(1));
        assert_eq!(resolve_edge(LayoutSide::Edge(13), 6), Some(1));
        assert_eq!(resolve_edge(LayoutSide::Around, 6), None);
    }

    #[test]
    fn diamond_tie_takes_lowest_edge() {
        // 135° and 225° midpoints are equally close to 180°
        assert_eq!(nearest_edge(4, PI), 2);
    }

    #[test]
    fn ratios_respect_padding() {
        assert_eq!(side_ratio(0, 1, 0.1), 0.5);
        assert!((side_ratio(0, 3, 0.1) - 0.1).abs() < 1e-12);
        assert!((side_ratio(1, 3, 0.1) - 0.5).abs() < 1e-12);
        assert!((side_ratio(2, 3, 0.1) - 0.9).abs() < 1e-12);
        // invalid padding falls back
        assert!((side_ratio(0, 2, f64::NAN) - DEFAULT_PADDING_RATIO).abs() < 1e-12);
    }

    #[test]
    fn around_spreads_full_circle() {
        let a = default_angles(4, LayoutSide::Around, &Shape::Circle, 0.1);
        for (i, x) in a.iter().enumerate() { assert!(near(*x, i as f64 * FRAC_PI_2)); }
    }

    #[test]
    fn circle_edge_follows_segment_count() {
        // one handle mid-segment: segment 0 spans 360/n degrees clockwise from the top
        let coarse = default_angles_with(1, LayoutSide::Edge(0), &Shape::Circle, 0.1, 4)[0];
        assert!(near(coarse, -FRAC_PI_2 + PI / 4.0));
        let fine = default_angles_with(1, LayoutSide::Edge(0), &Shape::Circle, 0.1, 8)[0];
        assert!(near(fine, -FRAC_PI_2 + PI / 8.0));
        assert_eq!(
            default_angles(3, LayoutSide::Edge(5), &Shape::Circle, 0.1),
            default_angles_with(3, LayoutSide::Edge(5), &Shape::Circle, 0.1, CIRCLE_SEGMENTS)
        );
    }

    #[test]
    fn zero_count_is_empty_and_huge_is_capped() {
        assert!(default_angles(0, LayoutSide::Left, &Shape::Circle, 0.1).is_empty());
        assert_eq!(default_angles(10_000, LayoutSide::Left, &Shape::Circle, 0.1).len(), MAX_HANDLES_PER_SIDE);
    }
}
