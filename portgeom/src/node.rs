use crate::algorithms::cardinal::angle_to_cardinal_side;
use crate::algorithms::layout::angle_for_side;
use crate::config::GeometryConfig;
use crate::drag::AngleSink;
use crate::geometry::project::Projector;
use crate::geometry::tolerance::normalize_angle;
use crate::model::{CardinalSide, HandleInfo, HandleRole, LayoutSide, Shape, Vec2};
use crate::GeomError;
use serde::{Deserialize, Serialize};

/// A component node as far as handle placement cares: its shape and its ports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortNode {
    pub id: String,
    #[serde(default)]
    pub shape: Shape,
    #[serde(default)]
    pub input_handles: Vec<HandleInfo>,
    #[serde(default)]
    pub output_handles: Vec<HandleInfo>,
    /// Bumped on every committed change; hosts persist when it moves.
    #[serde(skip)]
    pub commit_version: u64,
}

/// Derived placement of one handle. Never stored.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HandlePoint {
    pub id: String,
    pub role: HandleRole,
    pub angle: f64,
    pub point: Vec2,
    pub side: CardinalSide,
}

impl PortNode {
    pub fn new(id: impl Into<String>, shape: Shape) -> Self {
        PortNode { id: id.into(), shape, input_handles: Vec::new(), output_handles: Vec::new(), commit_version: 0 }
    }

    fn list(&self, role: HandleRole) -> &Vec<HandleInfo> {
        match role {
            HandleRole::Target => &self.input_handles,
            HandleRole::Source => &self.output_handles,
        }
    }

    fn list_mut(&mut self, role: HandleRole) -> &mut Vec<HandleInfo> {
        match role {
            HandleRole::Target => &mut self.input_handles,
            HandleRole::Source => &mut self.output_handles,
        }
    }

    pub fn handles(&self) -> impl Iterator<Item = (HandleRole, &HandleInfo)> {
        self.input_handles.iter().map(|h| (HandleRole::Target, h))
            .chain(self.output_handles.iter().map(|h| (HandleRole::Source, h)))
    }

    pub fn handle(&self, id: &str) -> Option<&HandleInfo> {
        self.handles().find(|(_, h)| h.id == id).map(|(_, h)| h)
    }

    pub fn handle_mut(&mut self, id: &str) -> Option<&mut HandleInfo> {
        self.input_handles.iter_mut().chain(self.output_handles.iter_mut()).find(|h| h.id == id)
    }

    pub fn role_of(&self, id: &str) -> Option<HandleRole> {
        self.handles().find(|(_, h)| h.id == id).map(|(r, _)| r)
    }

    /// Add a port. With an explicit angle the handle is pinned there; otherwise
    /// every auto-placed handle on its side is re-seeded by the default layout.
    pub fn add_handle(
        &mut self,
        role: HandleRole,
        id: impl Into<String>,
        angle: Option<f64>,
        cfg: &GeometryConfig,
    ) -> Result<&HandleInfo, GeomError> {
        let id = id.into();
        if self.handle(&id).is_some() {
            return Err(GeomError::DuplicateHandle(id));
        }
        let mut h = HandleInfo::new(id, role);
        if let Some(a) = angle {
            if !a.is_finite() {
                return Err(GeomError::NonFinite { param: "angle" });
            }
            h = h.with_angle(a);
        }
        let pinned = h.pinned;
        let side = h.layout_side(role);
        self.list_mut(role).push(h);
        if !pinned {
            self.relayout_side(role, side, cfg);
        }
        self.commit_version += 1;
        let list = self.list(role);
        Ok(&list[list.len() - 1])
    }

    pub fn remove_handle(&mut self, id: &str) -> Result<HandleInfo, GeomError> {
        for role in [HandleRole::Target, HandleRole::Source] {
            let list = self.list_mut(role);
            if let Some(pos) = list.iter().position(|h| h.id == id) {
                let h = list.remove(pos);
                self.commit_version += 1;
                return Ok(h);
            }
        }
        Err(GeomError::UnknownHandle(id.to_string()))
    }

    /// Re-seed auto-placed handles of `role` that share `side`.
    fn relayout_side(&mut self, role: HandleRole, side: LayoutSide, cfg: &GeometryConfig) {
        let shape = self.shape;
        let list = self.list_mut(role);
        let total = list.iter().filter(|h| !h.pinned && h.layout_side(role) == side).count();
        let mut i = 0usize;
        for h in list.iter_mut().filter(|h| !h.pinned && h.layout_side(role) == side) {
            h.angle = angle_for_side(side, i, total, &shape, cfg.padding_ratio, cfg.circle_segments);
            i += 1;
        }
    }

    /// Seed every auto-placed handle. Used after loading a document.
    pub fn relayout(&mut self, cfg: &GeometryConfig) {
        for role in [HandleRole::Target, HandleRole::Source] {
            let mut sides: Vec<LayoutSide> = Vec::new();
            for h in self.list(role).iter().filter(|h| !h.pinned) {
                let s = h.layout_side(role);
                if !sides.contains(&s) { sides.push(s); }
            }
            for s in sides {
                self.relayout_side(role, s, cfg);
            }
        }
    }

    /// Shape changes need no migration: points are derived from angles.
    pub fn set_shape(&mut self, shape: Shape) {
        if self.shape != shape {
            self.shape = shape;
            self.commit_version += 1;
        }
    }

    pub fn handle_points(&self, cfg: &GeometryConfig) -> Vec<HandlePoint> {
        let projector = Projector::from_config(self.shape, cfg);
        self.handles()
            .map(|(role, h)| HandlePoint {
                id: h.id.clone(),
                role: h.role.unwrap_or(role),
                angle: h.angle,
                point: projector.angle_to_point(h.angle),
                side: angle_to_cardinal_side(h.angle),
            })
            .collect()
    }
}

impl AngleSink for PortNode {
    fn on_live(&mut self, id: &str, angle: f64) {
        if let Some(h) = self.handle_mut(id) {
            h.angle = normalize_angle(angle);
            return;
        }
        log::debug!("node {}: live update for unknown handle {}", self.id, id);
    }

    fn on_commit(&mut self, id: &str, angle: f64) {
        if let Some(h) = self.handle_mut(id) {
            h.angle = normalize_angle(angle);
            h.pinned = true;
            self.commit_version += 1;
            return;
        }
        log::debug!("node {}: commit for unknown handle {}", self.id, id);
    }
}
