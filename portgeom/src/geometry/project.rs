// Boundary projection: angle -> boundary point, and point -> angle via the
// ray from the center. Circles use closed form; polygons use ray/edge intersection.

use super::intersect::intersect_ray_polygon;
use super::limits::in_coord_bounds;
use super::tolerance::{normalize_angle, norm2, EPS_DET};
use super::vertices::polygon_vertices;
use crate::config::GeometryConfig;
use crate::model::{Shape, Vec2};

pub const DEFAULT_RADIUS: f64 = 25.0;

/// Negative or non-finite radii fall back to the default.
#[inline]
pub fn sanitize_radius(radius: f64) -> f64 {
    if radius.is_finite() && radius >= 0.0 { radius } else { DEFAULT_RADIUS }
}

#[inline]
fn on_circle(angle: f64, radius: f64) -> Vec2 {
    Vec2 { x: radius * angle.cos(), y: radius * angle.sin() }
}

/// Shape plus size, ready to project. Vertices are regenerated per call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    pub shape: Shape,
    pub radius: f64,
    pub eps_det: f64,
}

impl Projector {
    pub fn new(shape: Shape, radius: f64) -> Self {
        Projector { shape, radius: sanitize_radius(radius), eps_det: EPS_DET }
    }

    pub fn from_config(shape: Shape, cfg: &GeometryConfig) -> Self {
        Projector { shape, radius: sanitize_radius(cfg.radius), eps_det: cfg.parallel_epsilon }
    }

    pub fn angle_to_point(&self, angle: f64) -> Vec2 {
        let a = normalize_angle(angle);
        let sides = match self.shape.sides() {
            None => return on_circle(a, self.radius),
            Some(n) => n,
        };
        let verts = polygon_vertices(sides, self.radius);
        let dir = Vec2 { x: a.cos(), y: a.sin() };
        match intersect_ray_polygon(Vec2::ZERO, dir, &verts, self.eps_det) {
            Some(hit) => hit.point,
            None => {
                log::warn!("no boundary hit for angle {:.6} on {}-gon; using circle", a, sides);
                on_circle(a, self.radius)
            }
        }
    }

    pub fn point_to_angle(&self, x: f64, y: f64) -> f64 {
        if !in_coord_bounds(x) || !in_coord_bounds(y) { return 0.0; }
        let ((dx, dy), _) = match norm2(x, y) {
            Some(d) => d,
            // the center has no direction
            None => return 0.0,
        };
        let sides = match self.shape.sides() {
            None => return normalize_angle(dy.atan2(dx)),
            Some(n) => n,
        };
        let verts = polygon_vertices(sides, self.radius);
        match intersect_ray_polygon(Vec2::ZERO, Vec2 { x: dx, y: dy }, &verts, self.eps_det) {
            Some(hit) => normalize_angle(hit.point.y.atan2(hit.point.x)),
            None => {
                log::warn!("no boundary hit for point ({}, {}) on {}-gon; using circle", x, y, sides);
                normalize_angle(dy.atan2(dx))
            }
        }
    }
}

pub fn angle_to_point(angle: f64, shape: &Shape, radius: f64) -> Vec2 {
    Projector::new(*shape, radius).angle_to_point(angle)
}

pub fn point_to_angle(x: f64, y: f64, shape: &Shape, radius: f64) -> f64 {
    Projector::new(*shape, radius).point_to_angle(x, y)
}
