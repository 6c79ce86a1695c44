use crate::api::{config, parse_shape};
use crate::error;
use crate::interop::{new_obj, set_kv};
use js_sys::Function;
use portgeom::{
    Activation, AngleUpdate, DownOutcome, HandleController, HandleRole, Modifiers, PointerDown, Projector, Rect,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlElement, MouseEvent};

type MouseClosure = Closure<dyn FnMut(MouseEvent)>;

// Closures detached mid-callback; freed on the next gesture or on destroy.
type Graveyard = Rc<RefCell<Vec<MouseClosure>>>;

/// Window listeners for one gesture. Dropping it detaches them.
struct ListenerGuard {
    target: EventTarget,
    listeners: Vec<(&'static str, MouseClosure)>,
    graveyard: Graveyard,
}

impl ListenerGuard {
    fn attach(target: EventTarget, listeners: Vec<(&'static str, MouseClosure)>, graveyard: Graveyard) -> Result<Self, JsValue> {
        let guard = ListenerGuard { target, listeners, graveyard };
        for (name, cb) in &guard.listeners {
            // on error the guard drops and removes whatever got attached
            guard.target.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())?;
        }
        Ok(guard)
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        for (name, cb) in self.listeners.drain(..) {
            let _ = self.target.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
            // may be the closure currently executing; free it later
            self.graveyard.borrow_mut().push(cb);
        }
    }
}

struct Inner {
    controller: HandleController<ListenerGuard>,
    handle_el: HtmlElement,
    node_el: HtmlElement,
    on_live: Function,
    on_commit: Function,
    graveyard: Graveyard,
}

impl Inner {
    fn node_rect(&self) -> Option<Rect> {
        if !self.node_el.is_connected() { return None; }
        let r = self.node_el.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.width(), r.height()))
    }

    /// Position the handle at its derived boundary point, in the node's box.
    fn render(&self) {
        let view = self.controller.view();
        let cx = self.node_el.offset_width() as f64 * 0.5;
        let cy = self.node_el.offset_height() as f64 * 0.5;
        let style = self.handle_el.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("left", &format!("{}px", cx + view.point.x));
        let _ = style.set_property("top", &format!("{}px", cy + view.point.y));
        let _ = style.set_property("transform", "translate(-50%, -50%)");
        let _ = style.set_property("cursor", if view.dragging { "grabbing" } else { "move" });
        let _ = self.handle_el.set_attribute("data-side", view.side.as_str());
        let _ = self.handle_el.set_attribute("data-connectable", if view.connectable { "true" } else { "false" });
    }
}

fn pointer_down_of(ev: &MouseEvent) -> PointerDown {
    PointerDown {
        x: ev.client_x() as f64,
        y: ev.client_y() as f64,
        button: ev.button(),
        modifiers: Modifiers { ctrl: ev.ctrl_key(), meta: ev.meta_key(), shift: ev.shift_key(), alt: ev.alt_key() },
    }
}

fn notify(f: &Function, u: &AngleUpdate) {
    if let Err(e) = f.call2(&JsValue::NULL, &JsValue::from_str(&u.id), &JsValue::from_f64(u.angle)) {
        log::error!("handle {}: angle callback threw: {:?}", u.id, e);
    }
}

fn on_move(weak: &Weak<RefCell<Inner>>, ev: MouseEvent) {
    let inner = match weak.upgrade() { Some(i) => i, None => return };
    let pending = {
        let mut s = inner.borrow_mut();
        if !s.node_el.is_connected() {
            s.controller.node_lost();
            None
        } else {
            let u = s.controller.pointer_move(ev.client_x() as f64, ev.client_y() as f64);
            s.render();
            u.map(|u| (u, s.on_live.clone()))
        }
    };
    // borrow released: the callback may call back into the element
    if let Some((u, f)) = pending { notify(&f, &u); }
}

fn on_up(weak: &Weak<RefCell<Inner>>) {
    let inner = match weak.upgrade() { Some(i) => i, None => return };
    let pending = {
        let mut s = inner.borrow_mut();
        // a node removed mid-drag never commits, moved or not
        if !s.node_el.is_connected() {
            s.controller.node_lost();
            None
        } else {
            let u = s.controller.pointer_up();
            s.render();
            u.map(|u| (u, s.on_commit.clone()))
        }
    };
    if let Some((u, f)) = pending { notify(&f, &u); }
}

fn on_down(weak: &Weak<RefCell<Inner>>, gate: &Rc<RefCell<Option<Function>>>, ev: MouseEvent) {
    let inner = match weak.upgrade() { Some(i) => i, None => return };
    // JS predicate runs before any borrow is taken
    let predicate = gate.borrow().clone();
    if let Some(f) = predicate {
        let info = new_obj();
        set_kv(&info, "button", &JsValue::from_f64(ev.button() as f64));
        set_kv(&info, "ctrlKey", &JsValue::from_bool(ev.ctrl_key()));
        set_kv(&info, "metaKey", &JsValue::from_bool(ev.meta_key()));
        set_kv(&info, "shiftKey", &JsValue::from_bool(ev.shift_key()));
        set_kv(&info, "altKey", &JsValue::from_bool(ev.alt_key()));
        let allowed = f.call1(&JsValue::NULL, &JsValue::from(info)).map(|v| v.is_truthy()).unwrap_or(false);
        if !allowed { return; }
    }
    let pd = pointer_down_of(&ev);
    let outcome = {
        let mut s = inner.borrow_mut();
        s.graveyard.borrow_mut().clear();
        let rect = s.node_rect();
        let graveyard = s.graveyard.clone();
        let w_move = weak.clone();
        let w_up = weak.clone();
        let attach = move || -> Result<ListenerGuard, JsValue> {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let mv: MouseClosure = Closure::wrap(Box::new(move |e: MouseEvent| on_move(&w_move, e)) as Box<dyn FnMut(MouseEvent)>);
            let up: MouseClosure = Closure::wrap(Box::new(move |_e: MouseEvent| on_up(&w_up)) as Box<dyn FnMut(MouseEvent)>);
            ListenerGuard::attach(window.into(), vec![("mousemove", mv), ("mouseup", up)], graveyard)
        };
        let outcome = s.controller.pointer_down(&pd, rect, attach);
        s.render();
        outcome
    };
    match outcome {
        Ok(DownOutcome::Started) => {
            // keep the press away from connection drawing
            ev.prevent_default();
            ev.stop_propagation();
        }
        Ok(DownOutcome::NoNode) => log::error!("unable to locate parent node for handle"),
        Ok(_) => {}
        Err(e) => log::error!("failed to attach drag listeners: {:?}", e),
    }
}

/// Draggable connection point bound to a handle element inside a node element.
#[wasm_bindgen]
pub struct HandleElement {
    inner: Rc<RefCell<Inner>>,
    gate: Rc<RefCell<Option<Function>>>,
    down: Option<MouseClosure>,
}

#[wasm_bindgen]
impl HandleElement {
    /// `role` is "source" or "target"; `angle` in radians. Callbacks get `(id, angle)`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        handle_el: HtmlElement,
        node_el: HtmlElement,
        id: String,
        role: &str,
        angle: f64,
        shape: JsValue,
        on_live: Function,
        on_commit: Function,
    ) -> Result<HandleElement, JsValue> {
        let role = match role {
            "source" => HandleRole::Source,
            "target" => HandleRole::Target,
            other => return Err(error::to_js_error("invalid_role", &format!("unknown handle role '{}'", other))),
        };
        let shape = parse_shape(&shape).map_err(|_| error::to_js_error("invalid_shape", "unrecognized shape"))?;
        let cfg = config();
        let controller = HandleController::new(id, role, angle, shape, cfg.radius)
            .with_projector(Projector::from_config(shape, &cfg));
        let inner = Rc::new(RefCell::new(Inner {
            controller,
            handle_el: handle_el.clone(),
            node_el,
            on_live,
            on_commit,
            graveyard: Rc::new(RefCell::new(Vec::new())),
        }));
        let gate: Rc<RefCell<Option<Function>>> = Rc::new(RefCell::new(None));
        let weak = Rc::downgrade(&inner);
        let g = gate.clone();
        let down: MouseClosure = Closure::wrap(Box::new(move |e: MouseEvent| on_down(&weak, &g, e)) as Box<dyn FnMut(MouseEvent)>);
        handle_el.add_event_listener_with_callback("mousedown", down.as_ref().unchecked_ref())?;
        inner.borrow().render();
        Ok(HandleElement { inner, gate, down: Some(down) })
    }

    /// Custom activation predicate called with `{button, ctrlKey, metaKey, shiftKey, altKey}`;
    /// `null` restores the default (Ctrl/Cmd + primary button).
    pub fn set_activation(&mut self, predicate: Option<Function>) {
        let activation = if predicate.is_some() { Activation::Custom(Box::new(|_: &PointerDown| true)) } else { Activation::default() };
        *self.gate.borrow_mut() = predicate;
        self.inner.borrow_mut().controller.set_activation(activation);
    }

    /// Owner pushes a new angle (e.g. after undoing a commit). Ignored while dragging.
    pub fn set_angle(&mut self, angle: f64) -> bool {
        let mut s = self.inner.borrow_mut();
        let changed = s.controller.set_angle(angle);
        if changed { s.render(); }
        changed
    }

    pub fn set_shape(&mut self, shape: JsValue) -> Result<(), JsValue> {
        let shape = parse_shape(&shape)?;
        let mut s = self.inner.borrow_mut();
        s.controller.set_shape(shape);
        s.render();
        Ok(())
    }

    pub fn set_radius(&mut self, radius: f64) {
        let mut s = self.inner.borrow_mut();
        s.controller.set_radius(radius);
        s.render();
    }

    pub fn angle(&self) -> f64 { self.inner.borrow().controller.angle() }
    pub fn side(&self) -> String { self.inner.borrow().controller.view().side.as_str().to_string() }
    pub fn is_dragging(&self) -> bool { self.inner.borrow().controller.is_dragging() }
    pub fn is_connectable(&self) -> bool { self.inner.borrow().controller.is_connectable() }

    /// Unmount: detaches every listener, aborts any drag without committing.
    pub fn destroy(&mut self) {
        let mut s = self.inner.borrow_mut();
        s.controller.teardown();
        if let Some(down) = self.down.take() {
            let _ = s.handle_el.remove_event_listener_with_callback("mousedown", down.as_ref().unchecked_ref());
        }
    }
}

impl Drop for HandleElement {
    fn drop(&mut self) {
        if let Ok(mut s) = self.inner.try_borrow_mut() {
            s.controller.teardown();
            if let Some(down) = self.down.take() {
                let _ = s.handle_el.remove_event_listener_with_callback("mousedown", down.as_ref().unchecked_ref());
            }
        }
    }
}
