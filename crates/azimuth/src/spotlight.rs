//! Spotlight overlay geometry for the guided tour.
//!
//! The overlay dims the whole viewport except for a rectangular hole around
//! the current step's anchor. The tooltip is placed beside that hole on the
//! step's [`Side`], or centered in the viewport when there is nothing to
//! point at. Placement is never clamped to the viewport, so a tooltip next to
//! an anchor near the screen edge can end up partially off-screen.

use crate::geometry::{LayoutQuery, Point, Rect, Size};
use crate::tour::{Side, TourEngine, TourStep};

/// Margin added around the anchor on every side to form the cutout.
pub const CUTOUT_INSET: f64 = 8.0;
/// Gap between the cutout edge and the tooltip.
pub const TOOLTIP_SPACING: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotlightPlacement {
    pub cutout: Option<Rect>,
    pub tooltip_top_left: Point,
}

impl SpotlightPlacement {
    pub fn tooltip_rect(&self, tooltip: Size) -> Rect {
        Rect::new(
            self.tooltip_top_left.x,
            self.tooltip_top_left.y,
            tooltip.width,
            tooltip.height,
        )
    }
}

/// Computes the cutout and tooltip position for `step`.
///
/// `anchor` is the measured box of the step's anchor; it is ignored when the
/// step names no anchor.
pub fn position(
    step: &TourStep,
    anchor: Option<Rect>,
    tooltip: Size,
    viewport: Size,
) -> SpotlightPlacement {
    let centered = Rect::from_center(viewport.center(), tooltip);
    let centered = Point::new(centered.x, centered.y);

    let Some(cutout) = step.anchor.as_ref().and(anchor).map(|r| r.inflate(CUTOUT_INSET)) else {
        return SpotlightPlacement {
            cutout: None,
            tooltip_top_left: centered,
        };
    };

    let mid = cutout.center();
    let tooltip_top_left = match step.side {
        Side::Top => Point::new(
            mid.x - tooltip.width / 2.0,
            cutout.y - TOOLTIP_SPACING - tooltip.height,
        ),
        Side::Bottom => Point::new(mid.x - tooltip.width / 2.0, cutout.bottom() + TOOLTIP_SPACING),
        Side::Left => Point::new(
            cutout.x - TOOLTIP_SPACING - tooltip.width,
            mid.y - tooltip.height / 2.0,
        ),
        Side::Right => Point::new(cutout.right() + TOOLTIP_SPACING, mid.y - tooltip.height / 2.0),
        Side::None => centered,
    };

    SpotlightPlacement {
        cutout: Some(cutout),
        tooltip_top_left,
    }
}

/// Dimmed area of the overlay: the viewport with an optional rectangular
/// exclusion, combined under the even-odd rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimRegion {
    pub outer: Rect,
    pub hole: Option<Rect>,
}

impl DimRegion {
    pub fn new(viewport: Size, cutout: Option<Rect>) -> Self {
        Self {
            outer: Rect::from_origin(viewport),
            hole: cutout,
        }
    }

    /// Rectangles to fill with the even-odd rule, outer first.
    pub fn paths(&self) -> impl Iterator<Item = Rect> {
        std::iter::once(self.outer).chain(self.hole)
    }

    /// Even-odd containment: a point is dimmed when it falls inside an odd
    /// number of the region's rectangles.
    pub fn contains(&self, p: Point) -> bool {
        self.paths().filter(|r| r.contains(p)).count() % 2 == 1
    }
}

/// Anchor measurement for the tour, refreshed only when the step changes.
#[derive(Debug, Clone, Default)]
pub struct Spotlight {
    measured: Option<(usize, Option<Rect>)>,
}

impl Spotlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the cached measurement, e.g. after a viewport resize.
    pub fn invalidate(&mut self) {
        self.measured = None;
    }

    /// Anchor box for the engine's current step, measuring it through
    /// `layout` if the step index differs from the cached one.
    pub fn anchor(&mut self, engine: &TourEngine, layout: &dyn LayoutQuery) -> Option<Rect> {
        let step = engine.current_step()?;
        let index = engine.step_index();

        match self.measured {
            Some((cached, rect)) if cached == index => rect,
            _ => {
                let rect = step.anchor.as_ref().and_then(|id| {
                    let rect = layout.bounding_rect(id);
                    if rect.is_none() {
                        log::warn!("Tour anchor '{}' not found, centering tooltip", id);
                    }
                    rect
                });
                self.measured = Some((index, rect));
                rect
            }
        }
    }

    pub fn place(
        &mut self,
        engine: &TourEngine,
        layout: &dyn LayoutQuery,
        tooltip: Size,
        viewport: Size,
    ) -> Option<SpotlightPlacement> {
        let anchor = self.anchor(engine, layout);
        let step = engine.current_step()?;
        Some(position(step, anchor, tooltip, viewport))
    }
}
