use crate::geometry::limits::{MAX_POLYGON_SIDES, MIN_POLYGON_SIDES};
use crate::geometry::tolerance::EPS_DET;
use crate::GeomError;
use serde::{Deserialize, Serialize};

/// Geometry parameters shared by every node. Missing JSON fields take defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Circumscribed radius of the node outline (px).
    pub radius: f64,
    /// Margin reserved at each end of a side by the default layout.
    pub padding_ratio: f64,
    /// Resolution of the circle when a discrete outline is needed.
    pub circle_segments: u32,
    /// Ray/edge determinant below which an edge counts as parallel.
    pub parallel_epsilon: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        GeometryConfig { radius: 25.0, padding_ratio: 0.1, circle_segments: 32, parallel_epsilon: EPS_DET }
    }
}

impl GeometryConfig {
    pub fn from_json_str(s: &str) -> Result<Self, GeomError> {
        let cfg: GeometryConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<Self, GeomError> {
        let cfg: GeometryConfig = serde_json::from_value(v)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), GeomError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GeomError::InvalidConfig(format!("radius must be finite and > 0, got {}", self.radius)));
        }
        if !self.padding_ratio.is_finite() || !(0.0..0.5).contains(&self.padding_ratio) {
            return Err(GeomError::InvalidConfig(format!("padding_ratio must be in [0, 0.5), got {}", self.padding_ratio)));
        }
        if !(MIN_POLYGON_SIDES..=MAX_POLYGON_SIDES).contains(&self.circle_segments) {
            return Err(GeomError::InvalidConfig(format!("circle_segments out of range: {}", self.circle_segments)));
        }
        if !self.parallel_epsilon.is_finite() || self.parallel_epsilon <= 0.0 {
            return Err(GeomError::InvalidConfig("parallel_epsilon must be finite and > 0".into()));
        }
        Ok(())
    }
}
