use crate::interop::{new_obj, set_kv};
use portgeom::GeomError;
use wasm_bindgen::prelude::*;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn out_of_range(param: &str, min: f64, max: f64, got: f64) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "min", &JsValue::from_f64(min));
    set_kv(&d, "max", &JsValue::from_f64(max));
    set_kv(&d, "got", &JsValue::from_f64(got));
    err("out_of_range", format!("parameter '{}' out of range", param), Some(d.into()))
}

#[inline]
pub fn invalid_shape(message: impl Into<String>) -> JsValue {
    err("invalid_shape", message, None)
}

#[inline]
pub fn invalid_side(got: &JsValue) -> JsValue {
    let d = new_obj(); set_kv(&d, "got", got);
    err("invalid_side", "side must be 'left', 'right', 'around' or an edge index", Some(d.into()))
}

pub fn from_geom(e: &GeomError) -> JsValue {
    match e {
        GeomError::InvalidSides { sides } => {
            let d = new_obj(); set_kv(&d, "sides", &JsValue::from_f64(*sides as f64));
            err(e.code(), e.to_string(), Some(d.into()))
        }
        GeomError::NonFinite { param } => non_finite(param),
        _ => err(e.code(), e.to_string(), None),
    }
}

/// Thrown form for constructors that return `Result<_, JsValue>`.
pub fn to_js_error(code: &str, message: &str) -> JsValue {
    let e = js_sys::Error::new(message);
    e.set_name(code);
    e.into()
}
