use super::model::{Overlay, Scene, SceneLayout, TooltipLayout, wrap_text};
use super::{
    COMPASS_SIZE, MARKING_STEP, TARGET_SIZE, TOOLTIP_LINE_HEIGHT, TOOLTIP_PADDING,
    TOOLTIP_TITLE_HEIGHT,
};
use crate::gui::theme::ThemeColors;
use azimuth::{Azimuth, Cardinal, Point, Rect};
use cairo::{Context, FontWeight};
use palette::Srgba;
use std::f64::consts::PI;

const EXPLANATION: &str = "Azimuth is a horizontal direction angle measured in degrees, \
     clockwise from a fixed reference. In navigation that reference is almost always \
     geographic north (0°).";
const EXAMPLES: [&str; 4] = ["90° is East", "180° is South", "270° is West", "0° / 360° is North"];

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn fill_rect(cr: &Context, rect: Rect, color: Srgba<f64>) -> Result<(), cairo::Error> {
    set_color(cr, color);
    cr.rectangle(rect.x, rect.y, rect.width, rect.height);
    cr.fill()
}

fn fill_circle(
    cr: &Context,
    center: Point,
    radius: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_color(cr, color);
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    cr.fill()
}

struct Text<'a> {
    content: &'a str,
    size: f64,
    weight: FontWeight,
    color: Srgba<f64>,
}

impl<'a> Text<'a> {
    fn new(content: &'a str, size: f64, color: Srgba<f64>) -> Self {
        Self {
            content,
            size,
            weight: FontWeight::Normal,
            color,
        }
    }

    fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    fn prepare(&self, cr: &Context) {
        set_color(cr, self.color);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, self.weight);
        cr.set_font_size(self.size);
    }

    /// Draws with the baseline starting at `at`.
    fn draw(&self, cr: &Context, at: Point) -> Result<(), cairo::Error> {
        self.prepare(cr);
        cr.move_to(at.x, at.y);
        cr.show_text(self.content)
    }

    fn draw_centered(&self, cr: &Context, center: Point) -> Result<(), cairo::Error> {
        self.prepare(cr);
        let ext = cr.text_extents(self.content)?;
        cr.move_to(
            center.x - ext.width() / 2.0 - ext.x_bearing(),
            center.y - ext.height() / 2.0 - ext.y_bearing(),
        );
        cr.show_text(self.content)
    }
}

struct CompassRenderer<'a> {
    layout: &'a SceneLayout,
    azimuth: Azimuth,
}

impl<'a> CompassRenderer<'a> {
    fn new(layout: &'a SceneLayout, azimuth: Azimuth) -> Self {
        Self { layout, azimuth }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_dial(cr, colors)?;
        self.draw_markings(cr, colors)?;
        self.draw_labels(cr, colors)?;
        self.draw_indicator(cr, colors)?;
        self.draw_target(cr, colors)
    }

    fn draw_dial(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let center = self.layout.compass.center();
        let radius = self.layout.compass.width / 2.0;
        fill_circle(cr, center, radius, colors.dial)?;
        fill_circle(cr, center, radius * 0.95, colors.dial_face)
    }

    fn draw_markings(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let frame = self.layout.frame();
        let inner = COMPASS_SIZE / 2.0 - 20.0;
        cr.set_line_width(2.0);

        for deg in (0..360).step_by(MARKING_STEP) {
            let (length, color) = match deg {
                d if d % 90 == 0 => (15.0, colors.tick_cardinal),
                d if d % 30 == 0 => (10.0, colors.tick),
                _ => (5.0, colors.tick),
            };
            let az = Azimuth::new(deg as f64);
            let from = frame.point_at(az, inner);
            let to = frame.point_at(az, inner + length);
            set_color(cr, color);
            cr.move_to(from.x, from.y);
            cr.line_to(to.x, to.y);
            cr.stroke()?;
        }
        Ok(())
    }

    fn draw_labels(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let frame = self.layout.frame();
        let distance = COMPASS_SIZE / 2.0 - 40.0;

        for cardinal in [Cardinal::North, Cardinal::East, Cardinal::South, Cardinal::West] {
            let at = frame.point_at(cardinal.azimuth(), distance);
            let text = match cardinal {
                Cardinal::North => Text::new(cardinal.abbreviation(), 24.0, colors.north).bold(),
                _ => Text::new(cardinal.abbreviation(), 20.0, colors.label),
            };
            text.draw_centered(cr, at)?;
        }
        Ok(())
    }

    fn draw_indicator(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let frame = self.layout.frame();
        let tip = frame.tip(self.azimuth);
        set_color(cr, colors.indicator);
        cr.set_line_width(3.0);
        cr.set_line_cap(cairo::LineCap::Round);
        cr.move_to(frame.center.x, frame.center.y);
        cr.line_to(tip.x, tip.y);
        cr.stroke()?;

        fill_circle(cr, frame.center, 10.0, colors.dial_face)?;
        fill_circle(cr, frame.center, 8.0, colors.accent)
    }

    fn draw_target(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let center = self.layout.target.center();
        let radius = TARGET_SIZE / 2.0;
        fill_circle(cr, center, radius, colors.target_ring)?;
        fill_circle(cr, center, radius - 4.0, colors.target)
    }
}

fn draw_header(
    cr: &Context,
    layout: &SceneLayout,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let center = Point::new(layout.viewport.width / 2.0, 40.0);
    Text::new("Interactive Compass: learn azimuth", 28.0, colors.text)
        .bold()
        .draw_centered(cr, center)
}

fn draw_panel(
    cr: &Context,
    layout: &SceneLayout,
    azimuth: Azimuth,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let panel = layout.panel;
    fill_rect(cr, panel, colors.panel)?;
    set_color(cr, colors.panel_border);
    cr.set_line_width(1.0);
    cr.rectangle(panel.x, panel.y, panel.width, panel.height);
    cr.stroke()?;

    let left = panel.x + TOOLTIP_PADDING;
    Text::new("Current azimuth", 22.0, colors.accent)
        .bold()
        .draw(cr, Point::new(left, panel.y + 40.0))?;

    let readout = azimuth.to_string();
    Text::new(&readout, 56.0, colors.text)
        .bold()
        .draw_centered(cr, Point::new(panel.center().x, panel.y + 96.0))?;

    let cardinal = azimuth.cardinal();
    let direction = format!("Heading towards {} ({})", cardinal, cardinal.abbreviation());
    Text::new(&direction, 16.0, colors.accent).draw(cr, Point::new(left, panel.y + 152.0))?;

    let mut y = panel.y + 184.0;
    for line in wrap_text(EXPLANATION, 44) {
        Text::new(&line, 13.0, colors.label).draw(cr, Point::new(left, y))?;
        y += 18.0;
    }
    y += 6.0;
    for example in EXAMPLES {
        Text::new(&format!("• {example}"), 13.0, colors.text_muted).draw(cr, Point::new(left, y))?;
        y += 18.0;
    }
    Ok(())
}

struct OverlayRenderer<'a> {
    overlay: &'a Overlay,
}

impl<'a> OverlayRenderer<'a> {
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_dim(cr, colors)?;
        self.draw_tooltip(cr, &self.overlay.tooltip, colors)
    }

    fn draw_dim(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        cr.save()?;
        set_color(cr, colors.overlay);
        cr.set_fill_rule(cairo::FillRule::EvenOdd);
        for rect in self.overlay.dim.paths() {
            cr.rectangle(rect.x, rect.y, rect.width, rect.height);
        }
        cr.fill()?;
        cr.restore()
    }

    fn draw_tooltip(
        &self,
        cr: &Context,
        tooltip: &TooltipLayout,
        colors: &ThemeColors,
    ) -> Result<(), cairo::Error> {
        let rect = tooltip.rect;
        fill_rect(cr, rect, colors.panel)?;
        set_color(cr, colors.panel_border);
        cr.set_line_width(1.0);
        cr.rectangle(rect.x, rect.y, rect.width, rect.height);
        cr.stroke()?;

        let left = rect.x + TOOLTIP_PADDING;
        Text::new(&tooltip.title, 20.0, colors.accent)
            .bold()
            .draw(cr, Point::new(left, rect.y + TOOLTIP_PADDING + 20.0))?;

        let mut y = rect.y + TOOLTIP_PADDING + TOOLTIP_TITLE_HEIGHT + 14.0;
        for line in &tooltip.lines {
            Text::new(line, 14.0, colors.label).draw(cr, Point::new(left, y))?;
            y += TOOLTIP_LINE_HEIGHT;
        }

        let button_mid = tooltip.next_button.center().y;
        Text::new(&tooltip.progress, 13.0, colors.text_muted)
            .draw(cr, Point::new(left, button_mid + 4.0))?;

        if let Some(prev) = tooltip.prev_button {
            self.draw_button(cr, prev, "Back", colors.button, colors.text)?;
        }
        self.draw_button(
            cr,
            tooltip.next_button,
            tooltip.next_label,
            colors.accent,
            colors.dial_face,
        )
    }

    fn draw_button(
        &self,
        cr: &Context,
        rect: Rect,
        label: &str,
        fill: Srgba<f64>,
        text: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        fill_rect(cr, rect, fill)?;
        Text::new(label, 14.0, text).bold().draw_centered(cr, rect.center())
    }
}

pub fn draw(cr: &Context, scene: &mut Scene, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let layout = scene.layout();

    fill_rect(cr, Rect::from_origin(layout.viewport), colors.background)?;
    draw_header(cr, &layout, colors)?;
    CompassRenderer::new(&layout, scene.azimuth).draw(cr, colors)?;
    draw_panel(cr, &layout, scene.azimuth, colors)?;

    if let Some(overlay) = scene.overlay() {
        OverlayRenderer { overlay: &overlay }.draw(cr, colors)?;
    }
    Ok(())
}
