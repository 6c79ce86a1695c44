use crate::geometry::limits::{clamp_sides, MAX_POLYGON_SIDES, MIN_POLYGON_SIDES};
use crate::geometry::tolerance::{from_degrees, normalize_angle, to_degrees};
use crate::GeomError;
use serde::{Deserialize, Serialize};

/// Point in node-local coordinates: origin at the node center, y down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub fn new(x: f64, y: f64) -> Self { Vec2 { x, y } }
    pub fn length(self) -> f64 { self.x.hypot(self.y) }
    pub fn lerp(self, other: Vec2, t: f64) -> Vec2 {
        Vec2 { x: self.x + t * (other.x - self.x), y: self.y + t * (other.y - self.y) }
    }
}

/// Node outline. A polygon is regular, centered, first vertex at the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", from = "ShapeRepr")]
pub enum Shape {
    Circle,
    Polygon { sides: u32 },
}

impl Default for Shape {
    fn default() -> Self { Shape::Polygon { sides: 6 } }
}

impl Shape {
    pub fn polygon(sides: u32) -> Result<Shape, GeomError> {
        if !(MIN_POLYGON_SIDES..=MAX_POLYGON_SIDES).contains(&sides) {
            return Err(GeomError::InvalidSides { sides });
        }
        Ok(Shape::Polygon { sides })
    }

    pub fn polygon_clamped(sides: u32) -> Shape {
        let clamped = clamp_sides(sides);
        if clamped != sides {
            log::warn!("polygon sides {} clamped to {}", sides, clamped);
        }
        Shape::Polygon { sides: clamped }
    }

    /// Side count, clamped; `None` for a circle.
    pub fn sides(&self) -> Option<u32> {
        match *self {
            Shape::Circle => None,
            Shape::Polygon { sides } => Some(clamp_sides(sides)),
        }
    }

    pub fn circumscribed_radius(&self, radius: f64) -> f64 { radius }

    pub fn inscribed_radius(&self, radius: f64) -> f64 {
        match self.sides() {
            None => radius,
            Some(n) => radius * (std::f64::consts::PI / n as f64).cos(),
        }
    }
}

// Deserialization path: out-of-range side counts are clamped so old documents still load.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ShapeRepr {
    Circle,
    Polygon { sides: u32 },
}

impl From<ShapeRepr> for Shape {
    fn from(r: ShapeRepr) -> Self {
        match r {
            ShapeRepr::Circle => Shape::Circle,
            ShapeRepr::Polygon { sides } => Shape::polygon_clamped(sides),
        }
    }
}

/// Coarse edge-routing side consumed by the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardinalSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl CardinalSide {
    pub fn as_str(self) -> &'static str {
        match self {
            CardinalSide::Top => "top",
            CardinalSide::Right => "right",
            CardinalSide::Bottom => "bottom",
            CardinalSide::Left => "left",
        }
    }
}

/// Where the default layout fans handles out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutSide {
    Left,
    Right,
    /// Explicit polygon edge, between vertex `i` and `i+1`.
    Edge(u32),
    /// Full circumference.
    Around,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleRole {
    /// Emits connections (output).
    Source,
    /// Receives connections (input).
    Target,
}

impl HandleRole {
    pub fn default_side(self) -> LayoutSide {
        match self {
            HandleRole::Source => LayoutSide::Right,
            HandleRole::Target => LayoutSide::Left,
        }
    }
    pub fn as_str(self) -> &'static str {
        match self {
            HandleRole::Source => "source",
            HandleRole::Target => "target",
        }
    }
}

/// Screen-space bounding rectangle (px).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self { Rect { left, top, width, height } }
    pub fn is_valid(&self) -> bool {
        self.left.is_finite() && self.top.is_finite() && self.width.is_finite() && self.height.is_finite()
            && self.width >= 0.0 && self.height >= 0.0
    }
    /// Screen point -> node-local point (origin at the rect center).
    pub fn to_local(&self, x: f64, y: f64) -> Vec2 {
        Vec2 { x: x - self.left - self.width * 0.5, y: y - self.top - self.height * 0.5 }
    }
}

/// Persisted connection point. The angle is the only positional fact;
/// the boundary point is always derived from it and the node shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "HandleRepr", into = "HandleRepr")]
pub struct HandleInfo {
    pub id: String,
    pub role: Option<HandleRole>,
    /// Radians in `[0, 2π)`. Stored as degrees on disk.
    pub angle: f64,
    /// Explicit angle (given or dragged); auto-placed handles are re-seeded on layout.
    pub pinned: bool,
    pub label: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub factor: Option<f64>,
    pub color: Option<String>,
    pub opacity: Option<f64>,
    /// Polygon edge preferred for initial placement.
    pub side: Option<u32>,
}

impl HandleInfo {
    pub fn new(id: impl Into<String>, role: HandleRole) -> Self {
        HandleInfo {
            id: id.into(),
            role: Some(role),
            angle: 0.0,
            pinned: false,
            label: None,
            name: None,
            description: None,
            factor: None,
            color: None,
            opacity: None,
            side: None,
        }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = normalize_angle(angle);
        self.pinned = true;
        self
    }

    pub fn layout_side(&self, role: HandleRole) -> LayoutSide {
        match self.side {
            Some(i) => LayoutSide::Edge(i),
            None => role.default_side(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct HandleRepr {
    id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    role: Option<HandleRole>,
    /// degrees, clockwise from +X
    #[serde(default, skip_serializing_if = "Option::is_none")]
    angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pinned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    side: Option<u32>,
}

impl From<HandleRepr> for HandleInfo {
    fn from(r: HandleRepr) -> Self {
        // A stored angle counts as explicit unless the record says otherwise.
        let pinned = r.pinned.unwrap_or(r.angle.is_some());
        HandleInfo {
            id: r.id,
            role: r.role,
            angle: r.angle.map(|d| normalize_angle(from_degrees(d))).unwrap_or(0.0),
            pinned,
            label: r.label,
            name: r.name,
            description: r.description,
            factor: r.factor,
            color: r.color,
            opacity: r.opacity,
            side: r.side,
        }
    }
}

impl From<HandleInfo> for HandleRepr {
    fn from(h: HandleInfo) -> Self {
        HandleRepr {
            id: h.id,
            role: h.role,
            angle: Some(to_degrees(normalize_angle(h.angle))),
            pinned: if h.pinned { None } else { Some(false) },
            label: h.label,
            name: h.name,
            description: h.description,
            factor: h.factor,
            color: h.color,
            opacity: h.opacity,
            side: h.side,
        }
    }
}
