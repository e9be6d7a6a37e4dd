//! Drag session lifecycle for the compass target.
//!
//! A session starts on a press over the target and ends on the next release
//! seen anywhere in the window. While it is active, global move and release
//! listeners are held through a [`Subscription`]; dropping the session is
//! the only way to release them, so every exit path detaches exactly once.

use crate::angle::{self, Azimuth, ReferenceFrame};
use crate::geometry::{AnchorId, LayoutQuery, Point};
use derive_more::{Display, From, Into};
use std::rc::Rc;
use strum::{EnumIter, IntoEnumIterator};

/// Global input listeners a drag session needs while active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ListenerKind {
    PointerMove,
    PointerRelease,
    TouchMove,
    TouchRelease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into)]
pub struct ListenerHandle(u64);

/// Window-level listener registration owned by the host toolkit.
pub trait ListenerRegistry {
    fn attach(&self, kind: ListenerKind) -> ListenerHandle;
    fn detach(&self, handle: ListenerHandle);
}

/// Scoped registration of every [`ListenerKind`]. Detaches on drop.
pub struct Subscription {
    registry: Rc<dyn ListenerRegistry>,
    handles: Vec<ListenerHandle>,
}

impl Subscription {
    pub fn acquire(registry: Rc<dyn ListenerRegistry>) -> Self {
        let handles = ListenerKind::iter()
            .map(|kind| registry.attach(kind))
            .collect();
        Self { registry, handles }
    }

    pub fn handles(&self) -> &[ListenerHandle] {
        &self.handles
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        for handle in self.handles.drain(..) {
            self.registry.detach(handle);
        }
    }
}

/// An active drag gesture.
pub struct DragSession {
    pub origin: Point,
    _subscription: Subscription,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

pub struct DragController {
    registry: Rc<dyn ListenerRegistry>,
    container: AnchorId,
    session: Option<DragSession>,
    azimuth: Azimuth,
}

impl DragController {
    pub fn new(registry: Rc<dyn ListenerRegistry>, container: AnchorId, azimuth: Azimuth) -> Self {
        Self {
            registry,
            container,
            session: None,
            azimuth,
        }
    }

    pub fn phase(&self) -> DragPhase {
        match self.session {
            Some(_) => DragPhase::Dragging,
            None => DragPhase::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Last published azimuth.
    pub fn azimuth(&self) -> Azimuth {
        self.azimuth
    }

    pub fn set_azimuth(&mut self, azimuth: Azimuth) {
        self.azimuth = azimuth;
    }

    /// Press on the target. Returns `true` when a new session was started;
    /// the host should then suppress its default gesture handling.
    pub fn press(&mut self, at: Point) -> bool {
        if self.session.is_some() {
            log::debug!("Press at {:?} ignored, drag already active", at);
            return false;
        }

        self.session = Some(DragSession {
            origin: at,
            _subscription: Subscription::acquire(self.registry.clone()),
        });
        log::debug!("Drag started at ({:.1}, {:.1})", at.x, at.y);
        true
    }

    pub fn pointer_moved(&mut self, point: Point, layout: &dyn LayoutQuery) -> Option<Azimuth> {
        if self.session.is_none() {
            return None;
        }

        // recomputed every move, the container may have moved or resized
        let Some(bounds) = layout.bounding_rect(&self.container) else {
            log::warn!("Cannot measure '{}', move dropped", self.container);
            return None;
        };

        let frame = ReferenceFrame::from_bounds(bounds);
        self.azimuth = angle::convert(point, &frame);
        Some(self.azimuth)
    }

    /// Touch move: only the first active touch point steers the target.
    pub fn touch_moved(&mut self, touches: &[Point], layout: &dyn LayoutQuery) -> Option<Azimuth> {
        let first = *touches.first()?;
        self.pointer_moved(first, layout)
    }

    /// Release anywhere. Returns `true` when a session ended.
    pub fn release(&mut self) -> bool {
        match self.session.take() {
            Some(_) => {
                log::debug!("Drag ended at {}", self.azimuth);
                true
            }
            None => false,
        }
    }

    /// Teardown path; equivalent to a release but never reported to the user.
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            log::debug!("Drag cancelled");
        }
    }
}

impl Drop for DragController {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use std::cell::{Cell, RefCell};
    use std::collections::{HashMap, HashSet};

    #[derive(Default)]
    struct RecordingRegistry {
        next: Cell<u64>,
        live: RefCell<HashSet<ListenerHandle>>,
        attached: Cell<usize>,
        detached: Cell<usize>,
    }

    impl ListenerRegistry for RecordingRegistry {
        fn attach(&self, _kind: ListenerKind) -> ListenerHandle {
            let handle = ListenerHandle::from(self.next.get());
            self.next.set(self.next.get() + 1);
            self.live.borrow_mut().insert(handle);
            self.attached.set(self.attached.get() + 1);
            handle
        }

        fn detach(&self, handle: ListenerHandle) {
            assert!(self.live.borrow_mut().remove(&handle), "double detach");
            self.detached.set(self.detached.get() + 1);
        }
    }

    fn container() -> AnchorId {
        AnchorId::from("dial")
    }

    fn layout() -> HashMap<AnchorId, Rect> {
        HashMap::from([(container(), Rect::new(0.0, 0.0, 200.0, 200.0))])
    }

    fn assert_near(actual: Option<Azimuth>, expected: f64) {
        let actual = actual.map(|a| a.degrees());
        assert!(
            actual.is_some_and(|a| (a - expected).abs() < 1e-9),
            "expected {expected}, got {actual:?}"
        );
    }

    fn setup() -> (Rc<RecordingRegistry>, DragController) {
        let registry = Rc::new(RecordingRegistry::default());
        let controller = DragController::new(registry.clone(), container(), Azimuth::new(45.0));
        (registry, controller)
    }

    #[test]
    fn test_press_attaches_every_listener_once() {
        let (registry, mut drag) = setup();
        assert_eq!(drag.phase(), DragPhase::Idle);

        assert!(drag.press(Point::new(100.0, 20.0)));
        assert_eq!(drag.phase(), DragPhase::Dragging);
        assert_eq!(registry.attached.get(), ListenerKind::iter().count());

        assert!(!drag.press(Point::new(100.0, 20.0)));
        assert_eq!(registry.attached.get(), ListenerKind::iter().count());
    }

    #[test]
    fn test_move_publishes_azimuth() {
        let (_registry, mut drag) = setup();
        let layout = layout();
        drag.press(Point::new(100.0, 20.0));

        let az = drag.pointer_moved(Point::new(100.0, 190.0), &layout);
        assert_near(az, 180.0);
        assert_near(Some(drag.azimuth()), 180.0);

        drag.pointer_moved(Point::new(10.0, 100.0), &layout);
        assert_near(Some(drag.azimuth()), 270.0);
    }

    #[test]
    fn test_touch_uses_first_point() {
        let (_registry, mut drag) = setup();
        let layout = layout();
        drag.press(Point::new(100.0, 20.0));

        let touches = [Point::new(190.0, 100.0), Point::new(100.0, 190.0)];
        assert_near(drag.touch_moved(&touches, &layout), 90.0);
        assert_eq!(drag.touch_moved(&[], &layout), None);
        assert_near(Some(drag.azimuth()), 90.0);
    }

    #[test]
    fn test_release_detaches_and_freezes_azimuth() {
        let (registry, mut drag) = setup();
        let layout = layout();
        drag.press(Point::new(100.0, 20.0));
        drag.pointer_moved(Point::new(100.0, 190.0), &layout);

        assert!(drag.release());
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert_eq!(registry.detached.get(), registry.attached.get());
        assert!(registry.live.borrow().is_empty());

        assert_eq!(drag.pointer_moved(Point::new(190.0, 100.0), &layout), None);
        assert_eq!(drag.touch_moved(&[Point::new(10.0, 100.0)], &layout), None);
        assert_near(Some(drag.azimuth()), 180.0);

        assert!(!drag.release());
    }

    #[test]
    fn test_unmeasurable_container_keeps_azimuth() {
        let (_registry, mut drag) = setup();
        drag.press(Point::new(100.0, 20.0));

        let empty: HashMap<AnchorId, Rect> = HashMap::new();
        assert_eq!(drag.pointer_moved(Point::new(100.0, 190.0), &empty), None);
        assert_eq!(drag.azimuth(), Azimuth::new(45.0));
        assert!(drag.is_dragging());
    }

    #[test]
    fn test_drop_while_dragging_detaches() {
        let (registry, mut drag) = setup();
        drag.press(Point::new(100.0, 20.0));
        assert_eq!(registry.live.borrow().len(), 4);

        drop(drag);
        assert!(registry.live.borrow().is_empty());
        assert_eq!(registry.detached.get(), 4);
    }

    #[test]
    fn test_each_session_gets_fresh_subscription() {
        let (registry, mut drag) = setup();
        for _ in 0..3 {
            drag.press(Point::new(100.0, 20.0));
            drag.release();
        }
        drag.cancel();
        assert_eq!(registry.attached.get(), 12);
        assert_eq!(registry.detached.get(), 12);
    }

    #[test]
    fn test_session_remembers_origin() {
        let (_registry, mut drag) = setup();
        drag.press(Point::new(12.0, 34.0));
        assert_eq!(drag.session().map(|s| s.origin), Some(Point::new(12.0, 34.0)));
    }
}
