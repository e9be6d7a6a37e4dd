use super::{
    BUTTON_GAP, BUTTON_HEIGHT, BUTTON_WIDTH, COLUMN_GAP, COMPASS_CONTAINER, COMPASS_SIZE,
    COMPASS_TARGET, EXPLANATION_PANEL, HEADER_HEIGHT, MARGIN, PANEL_HEIGHT, PANEL_WIDTH,
    TARGET_SIZE, TOOLTIP_CHARS_PER_LINE, TOOLTIP_LINE_HEIGHT, TOOLTIP_PADDING,
    TOOLTIP_TITLE_HEIGHT, TOOLTIP_WIDTH,
};
use azimuth::{
    AnchorId, Azimuth, DimRegion, LayoutQuery, Point, Rect, ReferenceFrame, Size, Spotlight,
    TourEngine, TourStep,
};

/// On-screen boxes of everything the scene draws, for one viewport size and
/// azimuth. Doubles as the anchor lookup for the tour and the drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    pub viewport: Size,
    pub compass: Rect,
    pub target: Rect,
    pub panel: Rect,
}

impl SceneLayout {
    /// Compass and panel side by side when they fit, stacked otherwise.
    pub fn compute(viewport: Size, azimuth: Azimuth) -> Self {
        let row_width = COMPASS_SIZE + COLUMN_GAP + PANEL_WIDTH;
        let dial = Size::new(COMPASS_SIZE, COMPASS_SIZE);
        let panel = Size::new(PANEL_WIDTH, PANEL_HEIGHT);

        let (compass, panel) = if viewport.width >= row_width + 2.0 * MARGIN {
            let left = (viewport.width - row_width) / 2.0;
            let below_header = (viewport.height - HEADER_HEIGHT) / 2.0;
            let mid_y = HEADER_HEIGHT + below_header.max(COMPASS_SIZE / 2.0);
            (
                Rect::from_center(Point::new(left + COMPASS_SIZE / 2.0, mid_y), dial),
                Rect::from_center(
                    Point::new(left + COMPASS_SIZE + COLUMN_GAP + PANEL_WIDTH / 2.0, mid_y),
                    panel,
                ),
            )
        } else {
            let column_height = COMPASS_SIZE + COLUMN_GAP + PANEL_HEIGHT;
            let slack = viewport.height - HEADER_HEIGHT - column_height;
            let top = HEADER_HEIGHT + (slack / 2.0).max(0.0);
            let mid_x = viewport.width / 2.0;
            (
                Rect::new(mid_x - COMPASS_SIZE / 2.0, top, COMPASS_SIZE, COMPASS_SIZE),
                Rect::new(
                    mid_x - PANEL_WIDTH / 2.0,
                    top + COMPASS_SIZE + COLUMN_GAP,
                    PANEL_WIDTH,
                    PANEL_HEIGHT,
                ),
            )
        };

        let tip = ReferenceFrame::from_bounds(compass).tip(azimuth);
        let target = Rect::from_center(tip, Size::new(TARGET_SIZE, TARGET_SIZE));

        Self {
            viewport,
            compass,
            target,
            panel,
        }
    }

    pub fn frame(&self) -> ReferenceFrame {
        ReferenceFrame::from_bounds(self.compass)
    }

    /// The target is round; presses in the corners of its box miss.
    pub fn hits_target(&self, p: Point) -> bool {
        let c = self.target.center();
        (p.x - c.x).hypot(p.y - c.y) <= TARGET_SIZE / 2.0
    }
}

impl LayoutQuery for SceneLayout {
    fn bounding_rect(&self, id: &AnchorId) -> Option<Rect> {
        match id.as_str() {
            COMPASS_CONTAINER => Some(self.compass),
            COMPASS_TARGET => Some(self.target),
            EXPLANATION_PANEL => Some(self.panel),
            _ => None,
        }
    }
}

/// Greedy word wrap on character count.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        let mut width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.chars().count();
            if width == 0 {
                current = word.to_string();
                width = word_width;
            } else if width + 1 + word_width <= max_chars {
                current.push(' ');
                current.push_str(word);
                width += 1 + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
                width = word_width;
            }
        }

        lines.push(current);
    }

    lines
}

/// Tooltip box of a tour step with its text lines and buttons, in viewport
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLayout {
    pub rect: Rect,
    pub title: String,
    pub lines: Vec<String>,
    pub progress: String,
    pub prev_button: Option<Rect>,
    pub next_button: Rect,
    pub next_label: &'static str,
}

impl TooltipLayout {
    pub fn size_for(step: &TourStep) -> Size {
        let lines = wrap_text(&step.body, TOOLTIP_CHARS_PER_LINE).len() as f64;
        Size::new(
            TOOLTIP_WIDTH,
            TOOLTIP_PADDING * 2.0
                + TOOLTIP_TITLE_HEIGHT
                + lines * TOOLTIP_LINE_HEIGHT
                + TOOLTIP_PADDING / 2.0
                + BUTTON_HEIGHT,
        )
    }

    pub fn new(step: &TourStep, step_index: usize, step_count: usize, top_left: Point) -> Self {
        let size = Self::size_for(step);
        let rect = Rect::new(top_left.x, top_left.y, size.width, size.height);

        let button_y = rect.bottom() - TOOLTIP_PADDING - BUTTON_HEIGHT;
        let next_button = Rect::new(
            rect.right() - TOOLTIP_PADDING - BUTTON_WIDTH,
            button_y,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
        );
        let prev_button = (step_index > 0).then(|| {
            Rect::new(
                next_button.x - BUTTON_GAP - BUTTON_WIDTH,
                button_y,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            )
        });
        let next_label = if step_index + 1 == step_count {
            "Finish"
        } else {
            "Next"
        };

        Self {
            rect,
            title: step.title.clone(),
            lines: wrap_text(&step.body, TOOLTIP_CHARS_PER_LINE),
            progress: format!("{} / {}", step_index + 1, step_count),
            prev_button,
            next_button,
            next_label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayHit {
    Prev,
    Next,
    /// Inside the cutout: the press reaches the widget underneath.
    Passthrough,
    Blocked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub dim: DimRegion,
    pub tooltip: TooltipLayout,
}

impl Overlay {
    pub fn hit(&self, p: Point) -> OverlayHit {
        let tooltip = &self.tooltip;
        if tooltip.rect.contains(p) {
            if tooltip.next_button.contains(p) {
                OverlayHit::Next
            } else if tooltip.prev_button.is_some_and(|b| b.contains(p)) {
                OverlayHit::Prev
            } else {
                OverlayHit::Blocked
            }
        } else if self.dim.contains(p) {
            OverlayHit::Blocked
        } else {
            OverlayHit::Passthrough
        }
    }
}

/// Everything the window draws: the published azimuth and the tour, if one
/// is running.
pub struct Scene {
    pub azimuth: Azimuth,
    pub viewport: Size,
    pub tour: Option<TourEngine>,
    spotlight: Spotlight,
}

impl Scene {
    pub fn new(azimuth: Azimuth, tour: Option<TourEngine>) -> Self {
        Self {
            azimuth,
            viewport: Size::default(),
            tour,
            spotlight: Spotlight::new(),
        }
    }

    pub fn layout(&self) -> SceneLayout {
        SceneLayout::compute(self.viewport, self.azimuth)
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.spotlight.invalidate();
        }
    }

    pub fn tour_active(&self) -> bool {
        self.tour.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Called after the tour's state has changed.
    pub fn tour_changed(&mut self) {
        if self.tour.as_ref().is_some_and(TourEngine::is_finished) {
            self.tour = None;
        }
    }

    pub fn end_tour(&mut self) {
        self.tour = None;
        self.spotlight.invalidate();
    }

    pub fn overlay(&mut self) -> Option<Overlay> {
        let layout = self.layout();
        let engine = self.tour.as_ref()?;
        let step = engine.current_step()?;
        let size = TooltipLayout::size_for(step);
        let placement = self.spotlight.place(engine, &layout, size, self.viewport)?;

        Some(Overlay {
            dim: DimRegion::new(self.viewport, placement.cutout),
            tooltip: TooltipLayout::new(
                step,
                engine.step_index(),
                engine.step_count(),
                placement.tooltip_top_left,
            ),
        })
    }
}
