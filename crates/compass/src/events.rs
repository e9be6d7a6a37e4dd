use azimuth::Point;

/// Input observed by the window-level listeners of an active drag.
#[derive(Debug, Clone)]
pub enum InputEvent {
    PointerMove(Point),
    TouchMove(Vec<Point>),
    Release,
}
