use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub dial: Srgba<f64>,
    pub dial_face: Srgba<f64>,
    pub tick: Srgba<f64>,
    pub tick_cardinal: Srgba<f64>,
    pub north: Srgba<f64>,
    pub label: Srgba<f64>,
    pub accent: Srgba<f64>,
    pub target: Srgba<f64>,
    pub target_ring: Srgba<f64>,
    pub indicator: Srgba<f64>,
    pub panel: Srgba<f64>,
    pub panel_border: Srgba<f64>,
    pub text: Srgba<f64>,
    pub text_muted: Srgba<f64>,
    pub overlay: Srgba<f64>,
    pub button: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            accent: Self::lookup_color(
                context,
                "accent_color",
                Srgba::new(0.13, 0.83, 0.93, 1.0),
                Some(1.0),
            ),
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.95, 0.96, 0.98, 1.0),
                None,
            ),
            overlay: Self::lookup_color(
                context,
                "shade_color",
                Srgba::new(0.0, 0.0, 0.0, 0.7),
                Some(0.7),
            ),
            ..Self::default()
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: Srgba::new(0.07, 0.09, 0.15, 1.0),
            dial: Srgba::new(0.12, 0.16, 0.23, 1.0),
            dial_face: Srgba::new(0.06, 0.09, 0.16, 1.0),
            tick: Srgba::new(0.39, 0.45, 0.55, 1.0),
            tick_cardinal: Srgba::new(1.0, 1.0, 1.0, 1.0),
            north: Srgba::new(0.94, 0.27, 0.27, 1.0),
            label: Srgba::new(0.80, 0.84, 0.88, 1.0),
            accent: Srgba::new(0.13, 0.83, 0.93, 1.0),
            target: Srgba::new(0.94, 0.27, 0.27, 1.0),
            target_ring: Srgba::new(1.0, 1.0, 1.0, 1.0),
            indicator: Srgba::new(0.94, 0.27, 0.27, 0.5),
            panel: Srgba::new(0.12, 0.16, 0.23, 1.0),
            panel_border: Srgba::new(0.2, 0.25, 0.33, 1.0),
            text: Srgba::new(0.95, 0.96, 0.98, 1.0),
            text_muted: Srgba::new(0.58, 0.64, 0.72, 1.0),
            overlay: Srgba::new(0.0, 0.0, 0.0, 0.7),
            button: Srgba::new(0.2, 0.25, 0.33, 1.0),
        }
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.compass-window, .compass-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
