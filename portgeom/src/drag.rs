//! Per-handle drag interaction.
//!
//! A controller is either `Idle` or `Dragging`. Entering `Dragging` acquires a
//! listener resource `L` (on the web side: the global move/up listeners); every
//! way out of `Dragging` drops it, including dropping the controller itself.
//! Move and release return an [`AngleUpdate`] instead of calling back directly
//! so the caller can release its own borrows before notifying anyone.
//!
//! Escape-to-cancel is not wired up; `node_lost` is the only abort path besides
//! `teardown`, and it is what a cancel key would call.

use crate::algorithms::cardinal::angle_to_cardinal_side;
use crate::geometry::project::{sanitize_radius, Projector};
use crate::geometry::tolerance::normalize_angle;
use crate::model::{CardinalSide, HandleRole, Rect, Shape, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

pub const PRIMARY_BUTTON: i16 = 0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerDown {
    pub x: f64,
    pub y: f64,
    pub button: i16,
    pub modifiers: Modifiers,
}

/// Gate deciding whether a pointer-down starts a reposition drag. Anything it
/// rejects is left to the surface's normal connection drawing.
pub enum Activation {
    Always,
    /// Primary button with Ctrl (or Cmd) held.
    CtrlOrMeta,
    Shift,
    Alt,
    Custom(Box<dyn Fn(&PointerDown) -> bool>),
}

impl Default for Activation {
    fn default() -> Self { Activation::CtrlOrMeta }
}

impl std::fmt::Debug for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Activation::Always => f.write_str("Always"),
            Activation::CtrlOrMeta => f.write_str("CtrlOrMeta"),
            Activation::Shift => f.write_str("Shift"),
            Activation::Alt => f.write_str("Alt"),
            Activation::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Activation {
    pub fn allows(&self, ev: &PointerDown) -> bool {
        let primary = ev.button == PRIMARY_BUTTON;
        match self {
            Activation::Always => primary,
            Activation::CtrlOrMeta => primary && (ev.modifiers.ctrl || ev.modifiers.meta),
            Activation::Shift => primary && ev.modifiers.shift,
            Activation::Alt => primary && ev.modifiers.alt,
            Activation::Custom(f) => f(ev),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateKind {
    /// Fired on every pointer-move; render only.
    Live,
    /// Fired once on release; persist.
    Commit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AngleUpdate {
    pub id: String,
    pub angle: f64,
    pub kind: UpdateKind,
}

/// Receiver of angle updates, usually the node collection owning the handle.
pub trait AngleSink {
    fn on_live(&mut self, id: &str, angle: f64);
    fn on_commit(&mut self, id: &str, angle: f64);
}

impl AngleUpdate {
    pub fn deliver<S: AngleSink + ?Sized>(&self, sink: &mut S) {
        match self.kind {
            UpdateKind::Live => sink.on_live(&self.id, self.angle),
            UpdateKind::Commit => sink.on_commit(&self.id, self.angle),
        }
    }
}

/// State of one gesture. Lives only while dragging.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub handle_id: String,
    /// Node bounding rect captured at pointer-down.
    pub rect: Rect,
    pub last_angle: f64,
    pub moves: u32,
}

pub enum DragState<L> {
    Idle,
    Dragging { session: DragSession, listeners: L },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownOutcome {
    Started,
    /// Activation gate said no.
    Ignored,
    /// A gesture already owns the pointer.
    Busy,
    /// No usable node rectangle.
    NoNode,
}

/// Everything a renderer needs for one handle.
#[derive(Clone, Debug, PartialEq)]
pub struct HandleView {
    pub id: String,
    pub role: HandleRole,
    pub angle: f64,
    pub point: Vec2,
    pub side: CardinalSide,
    pub dragging: bool,
    pub connectable: bool,
}

pub struct HandleController<L> {
    id: String,
    role: HandleRole,
    angle: f64,
    projector: Projector,
    activation: Activation,
    state: DragState<L>,
}

impl<L> HandleController<L> {
    pub fn new(id: impl Into<String>, role: HandleRole, angle: f64, shape: Shape, radius: f64) -> Self {
        HandleController {
            id: id.into(),
            role,
            angle: normalize_angle(angle),
            projector: Projector::new(shape, radius),
            activation: Activation::default(),
            state: DragState::Idle,
        }
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_projector(mut self, projector: Projector) -> Self {
        self.projector = projector;
        self
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn role(&self) -> HandleRole { self.role }
    pub fn shape(&self) -> Shape { self.projector.shape }

    /// Displayed angle: the live one while dragging, else the last accepted one.
    pub fn angle(&self) -> f64 {
        match &self.state {
            DragState::Dragging { session, .. } => session.last_angle,
            DragState::Idle => self.angle,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging { session, .. } => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool { matches!(self.state, DragState::Dragging { .. }) }

    /// Connection drawing is suspended while a reposition drag owns the gesture.
    pub fn is_connectable(&self) -> bool { !self.is_dragging() }

    /// Angle pushed down from the owner. Ignored mid-drag: the session is the only writer then.
    pub fn set_angle(&mut self, angle: f64) -> bool {
        if self.is_dragging() {
            log::debug!("handle {}: external angle ignored during drag", self.id);
            return false;
        }
        self.angle = normalize_angle(angle);
        true
    }

    pub fn set_shape(&mut self, shape: Shape) { self.projector.shape = shape; }

    pub fn set_radius(&mut self, radius: f64) { self.projector.radius = sanitize_radius(radius); }

    pub fn set_activation(&mut self, activation: Activation) { self.activation = activation; }

    /// Begin a drag if the gate allows it. `attach` runs only when the drag
    /// actually starts; its error leaves the controller idle.
    pub fn pointer_down<E, F>(&mut self, ev: &PointerDown, rect: Option<Rect>, attach: F) -> Result<DownOutcome, E>
    where
        F: FnOnce() -> Result<L, E>,
    {
        if self.is_dragging() { return Ok(DownOutcome::Busy); }
        if !self.activation.allows(ev) { return Ok(DownOutcome::Ignored); }
        let rect = match rect {
            Some(r) if r.is_valid() => r,
            _ => {
                log::warn!("handle {}: unable to locate parent node rect", self.id);
                return Ok(DownOutcome::NoNode);
            }
        };
        let listeners = attach()?;
        log::debug!("handle {}: drag start", self.id);
        self.state = DragState::Dragging {
            session: DragSession { handle_id: self.id.clone(), rect, last_angle: self.angle, moves: 0 },
            listeners,
        };
        Ok(DownOutcome::Started)
    }

    /// Screen-space cursor -> live angle. `None` when idle.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<AngleUpdate> {
        let projector = self.projector;
        let session = match &mut self.state {
            DragState::Dragging { session, .. } => session,
            DragState::Idle => return None,
        };
        let local = session.rect.to_local(x, y);
        let angle = projector.point_to_angle(local.x, local.y);
        session.last_angle = angle;
        session.moves += 1;
        log::trace!("handle {}: move #{} -> {:.6}", session.handle_id, session.moves, angle);
        Some(AngleUpdate { id: session.handle_id.clone(), angle, kind: UpdateKind::Live })
    }

    /// Finish the gesture: listeners released, one commit with the final angle.
    pub fn pointer_up(&mut self) -> Option<AngleUpdate> {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging { session, listeners } => {
                drop(listeners);
                self.angle = session.last_angle;
                log::debug!("handle {}: drag commit {:.6} after {} moves", self.id, self.angle, session.moves);
                Some(AngleUpdate { id: session.handle_id, angle: session.last_angle, kind: UpdateKind::Commit })
            }
            DragState::Idle => None,
        }
    }

    /// The node went away mid-drag: abort silently, nothing is committed.
    pub fn node_lost(&mut self) -> bool { self.abort("node lost") }

    /// Component teardown: listeners released unconditionally, no commit.
    pub fn teardown(&mut self) -> bool { self.abort("teardown") }

    fn abort(&mut self, why: &str) -> bool {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging { listeners, .. } => {
                drop(listeners);
                log::debug!("handle {}: drag aborted ({})", self.id, why);
                true
            }
            DragState::Idle => false,
        }
    }

    pub fn view(&self) -> HandleView {
        let angle = self.angle();
        HandleView {
            id: self.id.clone(),
            role: self.role,
            angle,
            point: self.projector.angle_to_point(angle),
            side: angle_to_cardinal_side(angle),
            dragging: self.is_dragging(),
            connectable: self.is_connectable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::convert::Infallible;
    use std::rc::Rc;

    struct Guard(Rc<Cell<i32>>);
    impl Drop for Guard {
        fn drop(&mut self) { self.0.set(self.0.get() - 1); }
    }

    fn attach(live: &Rc<Cell<i32>>) -> impl FnOnce() -> Result<Guard, Infallible> + '_ {
        move || {
            live.set(live.get() + 1);
            Ok(Guard(live.clone()))
        }
    }

    fn down(ctrl: bool) -> PointerDown {
        PointerDown { x: 0.0, y: 0.0, button: 0, modifiers: Modifiers { ctrl, ..Modifiers::default() } }
    }

    fn rect() -> Option<Rect> { Some(Rect::new(100.0, 100.0, 50.0, 50.0)) }

    fn ctl() -> HandleController<Guard> {
        HandleController::new("h", HandleRole::Source, 0.0, Shape::default(), 25.0)
    }

    #[test]
    fn listeners_released_on_release() {
        let live = Rc::new(Cell::new(0));
        let mut c = ctl();
        assert_eq!(c.pointer_down(&down(true), rect(), attach(&live)), Ok(DownOutcome::Started));
        assert_eq!(live.get(), 1);
        assert!(!c.is_connectable());
        assert!(c.pointer_up().is_some());
        assert_eq!(live.get(), 0);
        assert!(c.is_connectable());
    }

    #[test]
    fn listeners_released_on_drop() {
        let live = Rc::new(Cell::new(0));
        {
            let mut c = ctl();
            c.pointer_down(&down(true), rect(), attach(&live)).unwrap();
            assert_eq!(live.get(), 1);
        }
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn no_attach_without_activation() {
        let live = Rc::new(Cell::new(0));
        let mut c = ctl();
        assert_eq!(c.pointer_down(&down(false), rect(), attach(&live)), Ok(DownOutcome::Ignored));
        assert_eq!(live.get(), 0);
        assert!(c.pointer_move(160.0, 125.0).is_none());
        assert!(c.pointer_up().is_none());
    }

    #[test]
    fn second_down_is_busy() {
        let live = Rc::new(Cell::new(0));
        let mut c = ctl();
        c.pointer_down(&down(true), rect(), attach(&live)).unwrap();
        assert_eq!(c.pointer_down(&down(true), rect(), attach(&live)), Ok(DownOutcome::Busy));
        assert_eq!(live.get(), 1);
    }

    #[test]
    fn missing_or_bad_rect_never_starts() {
        let live = Rc::new(Cell::new(0));
        let mut c = ctl();
        assert_eq!(c.pointer_down(&down(true), None, attach(&live)), Ok(DownOutcome::NoNode));
        let bad = Some(Rect::new(f64::NAN, 0.0, 10.0, 10.0));
        assert_eq!(c.pointer_down(&down(true), bad, attach(&live)), Ok(DownOutcome::NoNode));
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn attach_failure_stays_idle() {
        let mut c: HandleController<Guard> = ctl();
        let r: Result<DownOutcome, &str> = c.pointer_down(&down(true), rect(), || Err("no window"));
        assert_eq!(r, Err("no window"));
        assert!(!c.is_dragging());
    }

    #[test]
    fn external_angle_ignored_while_dragging() {
        let live = Rc::new(Cell::new(0));
        let mut c = ctl();
        c.pointer_down(&down(true), rect(), attach(&live)).unwrap();
        assert!(!c.set_angle(1.0));
        assert_eq!(c.angle(), 0.0);
        c.teardown();
        assert!(c.set_angle(1.0));
        assert_eq!(c.angle(), 1.0);
    }

    #[test]
    fn move_is_relative_to_rect_center() {
        let live = Rc::new(Cell::new(0));
        let mut c = ctl();
        c.pointer_down(&down(true), rect(), attach(&live)).unwrap();
        // straight below the center of the 50x50 rect at (100,100)
        let u = c.pointer_move(125.0, 190.0).unwrap();
        assert!((u.angle - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert_eq!(u.kind, UpdateKind::Live);
        let v = c.view();
        assert!(v.dragging && !v.connectable);
        assert_eq!(v.side, CardinalSide::Bottom);
    }

    #[test]
    fn custom_activation() {
        let live = Rc::new(Cell::new(0));
        let mut c = ctl().with_activation(Activation::Custom(Box::new(|ev: &PointerDown| ev.button == 2)));
        assert_eq!(c.pointer_down(&down(true), rect(), attach(&live)), Ok(DownOutcome::Ignored));
        let right = PointerDown { button: 2, ..down(false) };
        assert_eq!(c.pointer_down(&right, rect(), attach(&live)), Ok(DownOutcome::Started));
    }
}
