use js_sys::{Float64Array, Reflect};
use portgeom_wasm::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn hexagon() -> JsValue { serde_wasm_bindgen::to_value(&serde_json::json!({"type": "polygon", "sides": 6})).unwrap() }
fn circle() -> JsValue { serde_wasm_bindgen::to_value(&serde_json::json!({"type": "circle"})).unwrap() }

fn get_f64(v: &JsValue, k: &str) -> f64 { Reflect::get(v, &JsValue::from_str(k)).unwrap().as_f64().unwrap() }

#[wasm_bindgen_test]
fn hexagon_ports_on_edge_midpoints() {
    let apothem = 25.0 * (std::f64::consts::PI / 6.0).cos();
    let left = angle_to_point(std::f64::consts::PI, hexagon(), Some(25.0));
    assert!((get_f64(&left, "x") + apothem).abs() < 1e-9);
    assert!(get_f64(&left, "y").abs() < 1e-9);
    let right = angle_to_point(0.0, hexagon(), None);
    assert!((get_f64(&right, "x") - apothem).abs() < 1e-9);
    assert_eq!(angle_to_cardinal_side(std::f64::consts::PI), "left");
    assert_eq!(angle_to_cardinal_side(0.0), "right");
}

#[wasm_bindgen_test]
fn point_to_angle_matches_cursor_direction() {
    let a = point_to_angle(0.0, 10.0, circle(), None);
    assert!((a - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert_eq!(point_to_angle(0.0, 0.0, hexagon(), None), 0.0);
    // unknown shapes fall back to the default instead of throwing
    assert!(point_to_angle(1.0, 0.0, JsValue::from_str("blob"), None).abs() < 1e-12);
}

#[wasm_bindgen_test]
fn default_angles_by_side_name() {
    let arr: Float64Array = default_angles(4, JsValue::from_str("right"), circle(), Some(0.1));
    let v = arr.to_vec();
    assert_eq!(v.len(), 4);
    let one = default_angles(1, JsValue::from_str("left"), hexagon(), None).to_vec();
    assert!((one[0] - std::f64::consts::PI).abs() < 1e-9);
    let edge = default_angles(2, JsValue::from_f64(4.0), hexagon(), None).to_vec();
    assert_eq!(edge.len(), 2);
}

#[wasm_bindgen_test]
fn outline_strings() {
    assert_eq!(clip_path_for_shape(circle()), "circle(50% at 50% 50%)");
    assert!(clip_path_for_shape(JsValue::NULL).starts_with("polygon(50% 0%"));
    let sq = serde_wasm_bindgen::to_value(&serde_json::json!({"type": "polygon", "sides": 4})).unwrap();
    assert_eq!(shape_svg_path(sq, Some(10.0)), "M 0 -10 L 10 0 L 0 10 L -10 0 Z");
}

#[wasm_bindgen_test]
fn config_round_trip() {
    let cfg = serde_wasm_bindgen::to_value(&serde_json::json!({"radius": 40.0})).unwrap();
    let r = configure_res(cfg);
    assert!(Reflect::get(&r, &JsValue::from_str("ok")).unwrap().as_bool().unwrap());
    let p = angle_to_point(0.0, circle(), None);
    assert!((get_f64(&p, "x") - 40.0).abs() < 1e-12);
    let back = get_config();
    assert_eq!(get_f64(&back, "radius"), 40.0);
    // circle resolution from the config reaches the outline
    let coarse = serde_wasm_bindgen::to_value(&serde_json::json!({"circle_segments": 4})).unwrap();
    assert!(Reflect::get(&configure_res(coarse), &JsValue::from_str("ok")).unwrap().as_bool().unwrap());
    assert_eq!(shape_svg_path(circle(), Some(10.0)), "M 0 -10 L 10 0 L 0 10 L -10 0 Z");
    // restore defaults for other tests
    let _ = configure_res(serde_wasm_bindgen::to_value(&serde_json::json!({})).unwrap());
}
