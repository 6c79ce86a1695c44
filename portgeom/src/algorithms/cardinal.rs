use crate::geometry::tolerance::{normalize_angle, to_degrees};
use crate::model::CardinalSide;

/// 90°-wide buckets centered on the axes. Total over every input; non-finite maps to `Right`.
pub fn angle_to_cardinal_side(angle: f64) -> CardinalSide {
    let deg = to_degrees(normalize_angle(angle));
    if deg >= 315.0 || deg < 45.0 {
        CardinalSide::Right
    } else if deg < 135.0 {
        CardinalSide::Bottom
    } else if deg < 225.0 {
        CardinalSide::Left
    } else {
        CardinalSide::Top
    }
}
