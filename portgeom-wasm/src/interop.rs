use js_sys::{Float64Array, Object, Reflect};
use portgeom::Vec2;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_f64(slice: &[f64]) -> Float64Array {
    let arr = Float64Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
pub fn point_obj(p: Vec2) -> JsValue {
    let o = new_obj();
    set_kv(&o, "x", &JsValue::from_f64(p.x));
    set_kv(&o, "y", &JsValue::from_f64(p.y));
    o.into()
}
