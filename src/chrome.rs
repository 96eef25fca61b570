use crate::{surface::Surface, theme::Theme};

/// Scroll offset past which the navbar switches to its raised look.
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavbarStyle {
    pub background: &'static str,
    pub box_shadow: &'static str,
}

impl NavbarStyle {
    pub fn select(theme: Theme, scroll_y: f64) -> Self {
        let raised = scroll_y > NAVBAR_SCROLL_THRESHOLD;
        match (theme, raised) {
            (Theme::Light, true) => Self {
                background: "rgba(255, 255, 255, 0.98)",
                box_shadow: "0 8px 32px rgba(0, 0, 0, 0.1)",
            },
            (Theme::Dark, true) => Self {
                background: "rgba(10, 10, 10, 0.85)",
                box_shadow: "0 8px 32px rgba(10, 132, 255, 0.1)",
            },
            (Theme::Light, false) => Self {
                background: "rgba(255, 255, 255, 0.95)",
                box_shadow: "0 1px 3px rgba(0, 0, 0, 0.08)",
            },
            (Theme::Dark, false) => Self {
                background: "rgba(10, 10, 10, 0.8)",
                box_shadow: "none",
            },
        }
    }

    pub fn apply(self, navbar: &impl Surface) {
        navbar.set_style("background", self.background);
        navbar.set_style("box-shadow", self.box_shadow);
    }
}
