// Node outline strings for the host surface: SVG path and CSS clip-path.

use crate::config::GeometryConfig;
use crate::geometry::limits::clamp_sides;
use crate::geometry::vertices::{polygon_vertices, shape_vertices};
use crate::model::{Shape, Vec2};

/// Outline vertices; a circle is approximated with `cfg.circle_segments` points.
pub fn outline(shape: &Shape, radius: f64, cfg: &GeometryConfig) -> Vec<Vec2> {
    shape_vertices(shape, radius, clamp_sides(cfg.circle_segments))
}

/// Closed `M .. L .. Z` path around the node center.
pub fn svg_path(shape: &Shape, radius: f64, cfg: &GeometryConfig) -> String {
    let verts = outline(shape, radius, cfg);
    let mut d = String::new();
    for (i, p) in verts.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        d.push_str(&format!("{} {} {}", cmd, fmt_num(p.x), fmt_num(p.y)));
    }
    d.push_str(" Z");
    d
}

/// CSS clip-path for a square node box. Polygon vertices are mapped from the
/// unit circle into percentages of the box.
pub fn clip_path(shape: &Shape) -> String {
    match shape.sides() {
        None => "circle(50% at 50% 50%)".to_string(),
        Some(n) => {
            let pts: Vec<String> = polygon_vertices(n, 1.0)
                .iter()
                .map(|p| format!("{}% {}%", fmt_num(50.0 + 50.0 * p.x), fmt_num(50.0 + 50.0 * p.y)))
                .collect();
            format!("polygon({})", pts.join(", "))
        }
    }
}

// Fixed precision, trailing zeros trimmed, no negative zero.
fn fmt_num(x: f64) -> String {
    let s = format!("{:.3}", x);
    let s = s.trim_end_matches('0').trim_end_matches('.').to_string();
    if s == "-0" { "0".to_string() } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hexagon_clip_path_starts_top_center() {
        let c = clip_path(&Shape::Polygon { sides: 6 });
        assert!(c.starts_with("polygon(50% 0%, 93.301% 25%"), "{}", c);
        assert_eq!(c.matches('%').count(), 12);
    }

    #[test]
    fn circle_clip_path() {
        assert_eq!(clip_path(&Shape::Circle), "circle(50% at 50% 50%)");
    }

    #[test]
    fn square_svg_path() {
        let d = svg_path(&Shape::Polygon { sides: 4 }, 10.0, &GeometryConfig::default());
        assert_eq!(d, "M 0 -10 L 10 0 L 0 10 L -10 0 Z");
    }

    #[test]
    fn circle_outline_is_discretized() {
        let cfg = GeometryConfig::default();
        assert_eq!(outline(&Shape::Circle, 1.0, &cfg).len(), cfg.circle_segments as usize);
        let coarse = GeometryConfig { circle_segments: 8, ..cfg };
        assert_eq!(outline(&Shape::Circle, 1.0, &coarse).len(), 8);
        // polygons ignore the circle resolution
        assert_eq!(outline(&Shape::Polygon { sides: 5 }, 1.0, &coarse).len(), 5);
    }

    #[test]
    fn config_loaded_segments_reach_svg_path() {
        let cfg = GeometryConfig::from_json_str(r#"{"circle_segments": 4}"#).unwrap();
        assert_eq!(svg_path(&Shape::Circle, 10.0, &cfg), "M 0 -10 L 10 0 L 0 10 L -10 0 Z");
    }
}
