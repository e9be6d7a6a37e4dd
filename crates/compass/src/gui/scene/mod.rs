pub mod model;
pub mod view;

pub use model::{Overlay, OverlayHit, Scene, SceneLayout, TooltipLayout};
pub use view::draw;

// Anchor ids the tour can point at
pub const COMPASS_CONTAINER: &str = "compass-container";
pub const COMPASS_TARGET: &str = "compass-target";
pub const EXPLANATION_PANEL: &str = "explanation-panel";

pub const MARGIN: f64 = 32.0;
pub const HEADER_HEIGHT: f64 = 72.0;
pub const COLUMN_GAP: f64 = 64.0;
pub const COMPASS_SIZE: f64 = 350.0;
pub const TARGET_SIZE: f64 = 32.0;
pub const PANEL_WIDTH: f64 = 400.0;
pub const PANEL_HEIGHT: f64 = 360.0;
pub const MARKING_STEP: usize = 10; // degrees between dial ticks

pub const TOOLTIP_WIDTH: f64 = 320.0;
pub const TOOLTIP_PADDING: f64 = 24.0;
pub const TOOLTIP_TITLE_HEIGHT: f64 = 32.0;
pub const TOOLTIP_LINE_HEIGHT: f64 = 20.0;
pub const TOOLTIP_CHARS_PER_LINE: usize = 34;
pub const BUTTON_WIDTH: f64 = 80.0;
pub const BUTTON_HEIGHT: f64 = 32.0;
pub const BUTTON_GAP: f64 = 8.0;
