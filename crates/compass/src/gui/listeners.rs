//! Window-level input listeners for an active drag.
//!
//! Each registration is a capture-phase [`gtk::EventControllerLegacy`] on the
//! toplevel, so motion and release are seen even after the pointer leaves
//! the drawing area. Coordinates are forwarded relative to the drawing area.

use crate::events::InputEvent;
use azimuth::{ListenerHandle, ListenerKind, ListenerRegistry, Point};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

pub struct WindowListeners {
    window: gtk::ApplicationWindow,
    surface: gtk::DrawingArea,
    forward: Rc<dyn Fn(InputEvent)>,
    next: Cell<u64>,
    controllers: RefCell<HashMap<ListenerHandle, gtk::EventControllerLegacy>>,
}

impl WindowListeners {
    pub fn new(
        window: gtk::ApplicationWindow,
        surface: gtk::DrawingArea,
        forward: impl Fn(InputEvent) + 'static,
    ) -> Self {
        Self {
            window,
            surface,
            forward: Rc::new(forward),
            next: Cell::new(0),
            controllers: RefCell::new(HashMap::new()),
        }
    }
}

/// Maps a window surface position onto `surface` coordinates.
fn local_position(
    window: &gtk::ApplicationWindow,
    surface: &gtk::DrawingArea,
    event: &gdk::Event,
) -> Option<Point> {
    let (x, y) = event.position()?;
    let (dx, dy) = window.surface_transform();
    window
        .translate_coordinates(surface, x - dx, y - dy)
        .map(|(x, y)| Point::new(x, y))
}

fn translate(
    kind: ListenerKind,
    event: &gdk::Event,
    position: impl Fn() -> Option<Point>,
) -> Option<InputEvent> {
    match (kind, event.event_type()) {
        (ListenerKind::PointerMove, gdk::EventType::MotionNotify) => {
            position().map(InputEvent::PointerMove)
        }
        (ListenerKind::PointerRelease, gdk::EventType::ButtonRelease) => Some(InputEvent::Release),
        (ListenerKind::TouchMove, gdk::EventType::TouchUpdate) => {
            position().map(|p| InputEvent::TouchMove(vec![p]))
        }
        (
            ListenerKind::TouchRelease,
            gdk::EventType::TouchEnd | gdk::EventType::TouchCancel,
        ) => Some(InputEvent::Release),
        _ => None,
    }
}

impl ListenerRegistry for WindowListeners {
    fn attach(&self, kind: ListenerKind) -> ListenerHandle {
        let handle = ListenerHandle::from(self.next.get());
        self.next.set(self.next.get() + 1);

        let controller = gtk::EventControllerLegacy::new();
        controller.set_propagation_phase(gtk::PropagationPhase::Capture);

        let forward = self.forward.clone();
        let window = self.window.clone();
        let surface = self.surface.clone();
        controller.connect_event(move |_, event| {
            let position = || local_position(&window, &surface, event);
            if let Some(input) = translate(kind, event, position) {
                forward(input);
            }
            glib::Propagation::Proceed
        });

        self.window.add_controller(controller.clone());
        self.controllers.borrow_mut().insert(handle, controller);
        log::debug!("Attached {:?} listener {}", kind, handle);
        handle
    }

    fn detach(&self, handle: ListenerHandle) {
        match self.controllers.borrow_mut().remove(&handle) {
            Some(controller) => {
                self.window.remove_controller(&controller);
                log::debug!("Detached listener {}", handle);
            }
            None => log::warn!("Listener {} was not attached", handle),
        }
    }
}
