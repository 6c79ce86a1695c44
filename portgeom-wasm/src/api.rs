use crate::error;
use crate::interop::{arr_f64, point_obj};
use js_sys::Float64Array;
use portgeom::algorithms::layout::{default_angles_with, sanitize_padding};
use portgeom::geometry::limits::MAX_HANDLES_PER_SIDE;
use portgeom::geometry::project::sanitize_radius;
use portgeom::{GeometryConfig, LayoutSide, Projector, Shape};
use std::cell::Cell;
use wasm_bindgen::prelude::*;

thread_local! {
    static CONFIG: Cell<GeometryConfig> = Cell::new(GeometryConfig::default());
}

pub(crate) fn config() -> GeometryConfig { CONFIG.with(|c| c.get()) }

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Replace the shared geometry config. Missing fields take defaults.
#[wasm_bindgen]
pub fn configure_res(cfg: JsValue) -> JsValue {
    let v = match serde_wasm_bindgen::from_value::<serde_json::Value>(cfg) {
        Ok(v) => v,
        Err(e) => return error::err("invalid_config", e.to_string(), None),
    };
    match GeometryConfig::from_json_value(v) {
        Ok(c) => {
            CONFIG.with(|cell| cell.set(c));
            log::debug!("geometry config set: {:?}", c);
            error::ok(JsValue::TRUE)
        }
        Err(e) => error::from_geom(&e),
    }
}

#[wasm_bindgen]
pub fn get_config() -> JsValue {
    serde_wasm_bindgen::to_value(&config()).unwrap_or(JsValue::NULL)
}

/// `null`/`undefined` mean the default hexagon.
pub(crate) fn parse_shape(v: &JsValue) -> Result<Shape, JsValue> {
    if v.is_null() || v.is_undefined() { return Ok(Shape::default()); }
    serde_wasm_bindgen::from_value::<Shape>(v.clone()).map_err(|e| error::invalid_shape(e.to_string()))
}

// Total variant: a malformed shape renders as the default.
fn shape_or_default(v: &JsValue) -> Shape {
    parse_shape(v).unwrap_or_else(|_| {
        log::warn!("unrecognized shape, using default");
        Shape::default()
    })
}

pub(crate) fn parse_side(v: &JsValue) -> Option<LayoutSide> {
    if let Some(s) = v.as_string() {
        return match s.as_str() {
            "left" => Some(LayoutSide::Left),
            "right" => Some(LayoutSide::Right),
            "around" => Some(LayoutSide::Around),
            _ => None,
        };
    }
    match v.as_f64() {
        Some(n) if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => Some(LayoutSide::Edge(n as u32)),
        _ => None,
    }
}

fn projector(shape: Shape, radius: Option<f64>) -> Projector {
    let cfg = config();
    let mut p = Projector::from_config(shape, &cfg);
    if let Some(r) = radius { p.radius = sanitize_radius(r); }
    p
}

// Envelope check shared by the `_res` entry points taking an optional radius.
fn check_radius(radius: Option<f64>) -> Result<(), JsValue> {
    match radius {
        Some(r) if !r.is_finite() => Err(error::non_finite("radius")),
        Some(r) if r < 0.0 => Err(error::out_of_range("radius", 0.0, f64::INFINITY, r)),
        _ => Ok(()),
    }
}

#[wasm_bindgen]
pub fn angle_to_point(angle: f64, shape: JsValue, radius: Option<f64>) -> JsValue {
    point_obj(projector(shape_or_default(&shape), radius).angle_to_point(angle))
}

#[wasm_bindgen]
pub fn angle_to_point_res(angle: f64, shape: JsValue, radius: Option<f64>) -> JsValue {
    if !angle.is_finite() { return error::non_finite("angle"); }
    if let Err(e) = check_radius(radius) { return e; }
    let shape = match parse_shape(&shape) { Ok(s) => s, Err(e) => return e };
    error::ok(point_obj(projector(shape, radius).angle_to_point(angle)))
}

#[wasm_bindgen]
pub fn point_to_angle(x: f64, y: f64, shape: JsValue, radius: Option<f64>) -> f64 {
    projector(shape_or_default(&shape), radius).point_to_angle(x, y)
}

#[wasm_bindgen]
pub fn point_to_angle_res(x: f64, y: f64, shape: JsValue, radius: Option<f64>) -> JsValue {
    if !x.is_finite() { return error::non_finite("x"); }
    if !y.is_finite() { return error::non_finite("y"); }
    if let Err(e) = check_radius(radius) { return e; }
    let shape = match parse_shape(&shape) { Ok(s) => s, Err(e) => return e };
    error::ok(JsValue::from_f64(projector(shape, radius).point_to_angle(x, y)))
}

/// Unknown sides fall back to `right`.
#[wasm_bindgen]
pub fn default_angles(count: u32, side: JsValue, shape: JsValue, padding_ratio: Option<f64>) -> Float64Array {
    let side = parse_side(&side).unwrap_or(LayoutSide::Right);
    let cfg = config();
    let padding = sanitize_padding(padding_ratio.unwrap_or(cfg.padding_ratio));
    arr_f64(&default_angles_with(count as usize, side, &shape_or_default(&shape), padding, cfg.circle_segments))
}

#[wasm_bindgen]
pub fn default_angles_res(count: u32, side: JsValue, shape: JsValue, padding_ratio: Option<f64>) -> JsValue {
    if count as usize > MAX_HANDLES_PER_SIDE {
        return error::out_of_range("count", 0.0, MAX_HANDLES_PER_SIDE as f64, count as f64);
    }
    let layout_side = match parse_side(&side) { Some(s) => s, None => return error::invalid_side(&side) };
    if let Some(p) = padding_ratio {
        if !p.is_finite() { return error::non_finite("padding_ratio"); }
        if !(0.0..0.5).contains(&p) { return error::out_of_range("padding_ratio", 0.0, 0.5, p); }
    }
    let shape = match parse_shape(&shape) { Ok(s) => s, Err(e) => return e };
    let cfg = config();
    let padding = padding_ratio.unwrap_or(cfg.padding_ratio);
    error::ok(arr_f64(&default_angles_with(count as usize, layout_side, &shape, padding, cfg.circle_segments)).into())
}

#[wasm_bindgen]
pub fn angle_to_cardinal_side(angle: f64) -> String {
    portgeom::angle_to_cardinal_side(angle).as_str().to_string()
}

#[wasm_bindgen]
pub fn clip_path_for_shape(shape: JsValue) -> String {
    portgeom::outline::clip_path(&shape_or_default(&shape))
}

#[wasm_bindgen]
pub fn shape_svg_path(shape: JsValue, radius: Option<f64>) -> String {
    let cfg = config();
    let r = radius.map(sanitize_radius).unwrap_or(cfg.radius);
    portgeom::outline::svg_path(&shape_or_default(&shape), r, &cfg)
}

#[wasm_bindgen]
pub fn make_shape_res(kind: &str, sides: Option<u32>) -> JsValue {
    let shape = match kind {
        "circle" => Shape::Circle,
        "polygon" => match Shape::polygon(sides.unwrap_or(6)) {
            Ok(s) => s,
            Err(e) => return error::from_geom(&e),
        },
        _ => return error::invalid_shape(format!("unknown shape type '{}'", kind)),
    };
    error::ok(serde_wasm_bindgen::to_value(&shape).unwrap_or(JsValue::NULL))
}
