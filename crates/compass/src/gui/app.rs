use crate::events::InputEvent;
use crate::gui::listeners::WindowListeners;
use crate::gui::scene::{self, COMPASS_CONTAINER, OverlayHit, Scene};
use crate::gui::theme::{self, ThemeColors};
use azimuth::{AnchorId, Azimuth, DragController, Point, Size, Tour, TourEngine, Transition};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppInit {
    pub azimuth: Azimuth,
    pub tour: Option<Tour>,
}

pub struct AppModel {
    pub scene: Rc<RefCell<Scene>>,
    pub drag: DragController,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Press(Point),
    PointerMove(Point),
    TouchMove(Vec<Point>),
    Release,
    Resize(Size),
    TourNext,
    TourPrev,
    TourSkip,
    TourFinished,
}

impl From<InputEvent> for AppMsg {
    fn from(event: InputEvent) -> Self {
        match event {
            InputEvent::PointerMove(p) => AppMsg::PointerMove(p),
            InputEvent::TouchMove(touches) => AppMsg::TouchMove(touches),
            InputEvent::Release => AppMsg::Release,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Azimuth Compass"),
            set_default_size: (1280, 800),
            add_css_class: "compass-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    let msg = if key == gtk::gdk::Key::Right || key == gtk::gdk::Key::Return {
                        AppMsg::TourNext
                    } else if key == gtk::gdk::Key::Left {
                        AppMsg::TourPrev
                    } else if key == gtk::gdk::Key::Escape {
                        AppMsg::TourSkip
                    } else {
                        return glib::Propagation::Proceed;
                    };
                    sender.input(msg);
                    glib::Propagation::Stop
                }
            },

            #[local_ref]
            drawing_area -> gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "compass-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(Size::new(width as f64, height as f64)));
                },

                add_controller = gtk::GestureClick {
                    set_button: 0, // Listen to all buttons
                    connect_pressed[sender] => move |gesture, _, x, y| {
                        // no default handling for presses on the canvas
                        gesture.set_state(gtk::EventSequenceState::Claimed);
                        sender.input(AppMsg::Press(Point::new(x, y)));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        theme::load_css();

        let canvas = gtk::DrawingArea::default();

        let forward = sender.clone();
        let registry = Rc::new(WindowListeners::new(
            root.clone(),
            canvas.clone(),
            move |event| forward.input(AppMsg::from(event)),
        ));
        let drag = DragController::new(registry, AnchorId::from(COMPASS_CONTAINER), init.azimuth);

        let finish = sender.clone();
        let tour = init.tour.map(|tour| {
            TourEngine::new(tour).on_finish(move || finish.input(AppMsg::TourFinished))
        });
        let scene = Rc::new(RefCell::new(Scene::new(init.azimuth, tour)));

        let model = AppModel {
            scene: scene.clone(),
            drag,
            drawing_area: canvas.clone(),
        };

        let drawing_area = &canvas;
        let widgets = view_output!();

        canvas.set_draw_func(move |area, cr, width, height| {
            let colors = ThemeColors::from_context(&area.style_context());
            let mut scene = scene.borrow_mut();
            scene.set_viewport(Size::new(width as f64, height as f64));
            if let Err(e) = scene::draw(cr, &mut scene, &colors) {
                log::error!("Drawing error: {}", e);
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Press(point) => self.press(point),
            AppMsg::PointerMove(point) => {
                let layout = self.scene.borrow().layout();
                if let Some(azimuth) = self.drag.pointer_moved(point, &layout) {
                    self.publish(azimuth);
                }
            }
            AppMsg::TouchMove(touches) => {
                let layout = self.scene.borrow().layout();
                if let Some(azimuth) = self.drag.touch_moved(&touches, &layout) {
                    self.publish(azimuth);
                }
            }
            AppMsg::Release => {
                if self.drag.release() {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Resize(size) => {
                self.scene.borrow_mut().set_viewport(size);
                self.drawing_area.queue_draw();
            }
            AppMsg::TourNext => self.navigate(TourEngine::next),
            AppMsg::TourPrev => self.navigate(TourEngine::prev),
            AppMsg::TourSkip => self.navigate(TourEngine::skip),
            AppMsg::TourFinished => {
                self.scene.borrow_mut().end_tour();
                log::info!("Tour finished");
                self.drawing_area.queue_draw();
            }
        }
    }
}

impl AppModel {
    fn publish(&mut self, azimuth: Azimuth) {
        self.scene.borrow_mut().azimuth = azimuth;
        self.drawing_area.queue_draw();
    }

    fn press(&mut self, point: Point) {
        let hit = self.scene.borrow_mut().overlay().map(|o| o.hit(point));
        match hit {
            Some(OverlayHit::Next) => {
                self.navigate(TourEngine::next);
                return;
            }
            Some(OverlayHit::Prev) => {
                self.navigate(TourEngine::prev);
                return;
            }
            Some(OverlayHit::Blocked) => return,
            Some(OverlayHit::Passthrough) | None => {}
        }

        let on_target = self.scene.borrow().layout().hits_target(point);
        if on_target && self.drag.press(point) {
            self.drawing_area.queue_draw();
        }
    }

    fn navigate(&mut self, step: fn(&mut TourEngine) -> Transition) {
        let mut scene = self.scene.borrow_mut();
        let transition = match scene.tour.as_mut() {
            Some(engine) => step(engine),
            None => return,
        };
        scene.tour_changed();
        drop(scene);
        if transition != Transition::Ignored {
            self.drawing_area.queue_draw();
        }
    }
}
