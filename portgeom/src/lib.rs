pub mod model;
pub mod config;
pub mod drag;
pub mod node;
pub mod outline;
pub mod geometry {
    pub mod intersect;
    pub mod limits;
    pub mod project;
    pub mod tolerance;
    pub mod vertices;
}
pub mod algorithms {
    pub mod cardinal;
    pub mod layout;
}
mod error;

pub use algorithms::cardinal::angle_to_cardinal_side;
pub use algorithms::layout::default_angles;
pub use config::GeometryConfig;
pub use drag::{Activation, AngleSink, AngleUpdate, DownOutcome, HandleController, HandleView, Modifiers, PointerDown, UpdateKind};
pub use error::GeomError;
pub use geometry::project::{angle_to_point, point_to_angle, Projector};
pub use model::{CardinalSide, HandleInfo, HandleRole, LayoutSide, Rect, Shape, Vec2};
pub use node::{HandlePoint, PortNode};
