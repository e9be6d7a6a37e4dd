//! Interaction core for the azimuth compass: pointer-to-bearing conversion,
//! the drag session lifecycle, the guided tour and its spotlight overlay.

pub mod macros;

pub mod angle;
pub mod drag;
pub mod geometry;
pub mod spotlight;
pub mod tour;

pub use angle::{Azimuth, Cardinal, ReferenceFrame};
pub use drag::{DragController, DragPhase, ListenerHandle, ListenerKind, ListenerRegistry};
pub use geometry::{AnchorId, LayoutQuery, Point, Rect, Size};
pub use spotlight::{DimRegion, Spotlight, SpotlightPlacement};
pub use tour::{Side, Tour, TourEngine, TourError, TourState, TourStep, Transition};
