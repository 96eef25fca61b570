use crate::surface::Surface;

pub const SKILL_CARD_SELECTOR: &str = ".skill-card";
pub const SKILL_ICON_SELECTOR: &str = ".skill-icon";
pub const TECH_BADGE_SELECTOR: &str = ".tech-badge";

pub const PULSE_STYLE_ID: &str = "subtle-pulse-keyframes";
pub const PULSE_KEYFRAMES: &str = "
    @keyframes subtle-pulse {
        0%, 100% { transform: scale(1); }
        50% { transform: scale(1.1); }
    }
";

const PULSE_ANIMATION: &str = "subtle-pulse 0.6s ease";

pub fn pulse_icon(icon: &impl Surface, hovered: bool) {
    icon.set_style("animation", if hovered { PULSE_ANIMATION } else { "" });
}

pub fn lift_badge(badge: &impl Surface, hovered: bool) {
    let offset = if hovered {
        "translateY(-2px)"
    } else {
        "translateY(0)"
    };
    badge.set_style("transform", offset);
}
