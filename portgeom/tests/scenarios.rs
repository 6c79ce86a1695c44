use portgeom::geometry::tolerance::{angle_delta, from_degrees};
use portgeom::geometry::vertices::polygon_vertices;
use portgeom::{angle_to_cardinal_side, angle_to_point, default_angles, CardinalSide, LayoutSide, PortNode, Shape, HandleRole, GeometryConfig};
use std::f64::consts::PI;

const R: f64 = 25.0;

#[test]
fn hexagon_ports_land_on_edge_midpoints() {
    let hex = Shape::Polygon { sides: 6 };
    let v = polygon_vertices(6, R);

    let input = default_angles(1, LayoutSide::Left, &hex, 0.1)[0];
    let output = default_angles(1, LayoutSide::Right, &hex, 0.1)[0];
    assert!(angle_delta(input, from_degrees(180.0)).abs() < 1e-12);
    assert!(angle_delta(output, 0.0).abs() < 1e-12);

    let left_mid = v[4].lerp(v[5], 0.5);
    let right_mid = v[1].lerp(v[2], 0.5);
    let pi = angle_to_point(from_degrees(180.0), &hex, R);
    let po = angle_to_point(0.0, &hex, R);
    assert!((pi.x - left_mid.x).abs() < 1e-9 && (pi.y - left_mid.y).abs() < 1e-9, "{:?} vs {:?}", pi, left_mid);
    assert!((po.x - right_mid.x).abs() < 1e-9 && (po.y - right_mid.y).abs() < 1e-9, "{:?} vs {:?}", po, right_mid);
    // apothem of a hexagon
    assert!((po.x - R * (PI / 6.0).cos()).abs() < 1e-9);

    assert_eq!(angle_to_cardinal_side(from_degrees(180.0)), CardinalSide::Left);
    assert_eq!(angle_to_cardinal_side(0.0), CardinalSide::Right);
}

#[test]
fn circle_right_half_four_handles() {
    let p = 0.1;
    let a = default_angles(4, LayoutSide::Right, &Shape::Circle, p);
    assert_eq!(a.len(), 4);
    // padded span of the right half arc, [-90°, 90°]
    let first = -PI / 2.0 + p * PI;
    let step = (1.0 - 2.0 * p) * PI / 3.0;
    for (i, x) in a.iter().enumerate() {
        assert!(angle_delta(*x, first + step * i as f64).abs() < 1e-12, "i={} got {}", i, x);
        let pt = angle_to_point(*x, &Shape::Circle, R);
        assert!((pt.length() - R).abs() < 1e-9);
        assert_ne!(angle_to_cardinal_side(*x), CardinalSide::Left);
    }
    for w in a.windows(2) {
        assert!((angle_delta(w[1], w[0]) - step).abs() < 1e-12);
    }
}

#[test]
fn shape_change_relocates_without_migration() {
    let cfg = GeometryConfig::default();
    let mut n = PortNode::new("a", Shape::Polygon { sides: 6 });
    n.add_handle(HandleRole::Target, "a-in", Some(PI), &cfg).unwrap();
    n.add_handle(HandleRole::Source, "a-out", Some(0.0), &cfg).unwrap();
    let before = n.handle_points(&cfg);
    n.set_shape(Shape::Circle);
    let after = n.handle_points(&cfg);
    assert_eq!(before.len(), 2);
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(b.id, a.id);
        assert_eq!(b.angle, a.angle);
        assert!((a.point.length() - cfg.radius).abs() < 1e-9);
        assert!(b.point.length() < cfg.radius);
    }
    assert_eq!(after[0].side, CardinalSide::Left);
    assert_eq!(after[0].role, HandleRole::Target);
    assert_eq!(after[1].side, CardinalSide::Right);
}
