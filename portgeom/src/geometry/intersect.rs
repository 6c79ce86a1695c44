// Ray/segment and ray/polygon intersection in f64.
// Ray: origin + t*dir (t >= 0). Edge: v1 + u*(v2 - v1) (u in [0,1]).

use super::tolerance::EPS_PARAM;
use crate::model::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub t: f64,
    pub u: f64,
    pub edge: usize,
    pub point: Vec2,
}

/// Solve the 2x2 system for one edge. Near-parallel edges (|det| < eps_det) are rejected.
pub fn intersect_ray_segment(origin: Vec2, dir: Vec2, v1: Vec2, v2: Vec2, eps_det: f64) -> Option<(f64, f64)> {
    let ex = v2.x - v1.x;
    let ey = v2.y - v1.y;
    let det = dir.x * ey - dir.y * ex;
    if det.abs() < eps_det { return None; }
    let dx = v1.x - origin.x;
    let dy = v1.y - origin.y;
    let t = (dx * ey - dy * ex) / det;
    let u = (dx * dir.y - dy * dir.x) / det;
    if t >= 0.0 && u >= -EPS_PARAM && u <= 1.0 + EPS_PARAM { Some((t, u)) } else { None }
}

/// Closest hit over the closed polygon `verts`. Ties on t keep the lowest edge index.
pub fn intersect_ray_polygon(origin: Vec2, dir: Vec2, verts: &[Vec2], eps_det: f64) -> Option<RayHit> {
    let n = verts.len();
    if n < 2 { return None; }
    let mut best: Option<RayHit> = None;
    for i in 0..n {
        let v1 = verts[i];
        let v2 = verts[(i + 1) % n];
        if let Some((t, u)) = intersect_ray_segment(origin, dir, v1, v2, eps_det) {
            // strict < keeps the earlier edge on exact ties
            if best.map_or(true, |b| t < b.t) {
                let point = Vec2 { x: origin.x + t * dir.x, y: origin.y + t * dir.y };
                best = Some(RayHit { t, u, edge: i, point });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tolerance::EPS_DET;

    fn v(x: f64, y: f64) -> Vec2 { Vec2 { x, y } }

    fn square() -> Vec<Vec2> { vec![v(-1.0, -1.0), v(1.0, -1.0), v(1.0, 1.0), v(-1.0, 1.0)] }

    #[test]
    fn ray_hits_right_edge() {
        let hit = intersect_ray_polygon(v(0.0, 0.0), v(1.0, 0.0), &square(), EPS_DET).expect("hit");
        assert_eq!(hit.edge, 1);
        assert!((hit.t - 1.0).abs() < 1e-12);
        assert!((hit.u - 0.5).abs() < 1e-12);
        assert!((hit.point.x - 1.0).abs() < 1e-12 && hit.point.y.abs() < 1e-12);
    }

    #[test]
    fn parallel_edge_is_rejected() {
        assert!(intersect_ray_segment(v(0.0, 0.0), v(1.0, 0.0), v(-1.0, 1.0), v(1.0, 1.0), EPS_DET).is_none());
    }

    #[test]
    fn behind_origin_is_rejected() {
        assert!(intersect_ray_segment(v(0.0, 0.0), v(1.0, 0.0), v(-1.0, -1.0), v(-1.0, 1.0), EPS_DET).is_none());
    }

    #[test]
    fn corner_tie_keeps_lowest_edge() {
        let d = std::f64::consts::FRAC_1_SQRT_2;
        let hit = intersect_ray_polygon(v(0.0, 0.0), v(d, d), &square(), EPS_DET).expect("hit");
        // corner (1,1) is shared by edges 1 and 2
        assert_eq!(hit.edge, 1);
        assert!((hit.point.x - 1.0).abs() < 1e-9 && (hit.point.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_polygon_has_no_hit() {
        assert!(intersect_ray_polygon(v(0.0, 0.0), v(1.0, 0.0), &[v(1.0, 0.0)], EPS_DET).is_none());
    }
}
