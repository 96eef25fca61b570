use crate::surface::Surface;
use std::cell::Cell;

pub const CARD_SELECTOR: &str = ".project-card, .skill-card, .achievement-card, .contact-card";
pub const SECTION_SELECTOR: &str = "section";
pub const SECTION_VISIBLE_CLASS: &str = "section-visible";

const HIDDEN_OFFSET: &str = "translateY(40px)";
const SETTLED_OFFSET: &str = "translateY(0)";

/// Options for one visibility observer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

pub const CARD_OBSERVER: ObserverOptions = ObserverOptions {
    threshold: 0.15,
    root_margin: "0px 0px -80px 0px",
};

pub const SECTION_OBSERVER: ObserverOptions = ObserverOptions {
    threshold: 0.1,
    root_margin: "0px",
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

/// Delay before the card at `index` starts its transition, in seconds.
pub fn stagger_delay(index: usize) -> f64 {
    index as f64 / 10.0
}

pub fn card_transition(index: usize) -> String {
    let delay = stagger_delay(index);
    format!("opacity 0.6s ease {delay}s, transform 0.6s ease {delay}s")
}

/// A card that fades up into place the first time it becomes visible.
pub struct RevealCard<E: Surface> {
    element: E,
    state: Cell<RevealState>,
}

impl<E: Surface> RevealCard<E> {
    /// Hides the element and arms its staggered transition.
    pub fn prepare(element: E, index: usize) -> Self {
        element.set_style("opacity", "0");
        element.set_style("transform", HIDDEN_OFFSET);
        element.set_style("transition", &card_transition(index));
        Self {
            element,
            state: Cell::new(RevealState::Pending),
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    /// Returns true when this notification revealed the card.
    pub fn observe(&self, is_intersecting: bool) -> bool {
        if !is_intersecting || self.state.get() == RevealState::Revealed {
            return false;
        }
        self.element.set_style("opacity", "1");
        self.element.set_style("transform", SETTLED_OFFSET);
        self.state.set(RevealState::Revealed);
        true
    }
}

/// A section that gains [`SECTION_VISIBLE_CLASS`] once.
pub struct RevealSection<E: Surface> {
    element: E,
    state: Cell<RevealState>,
}

impl<E: Surface> RevealSection<E> {
    pub fn new(element: E) -> Self {
        Self {
            element,
            state: Cell::new(RevealState::Pending),
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn observe(&self, is_intersecting: bool) -> bool {
        if !is_intersecting || self.state.get() == RevealState::Revealed {
            return false;
        }
        self.element.add_class(SECTION_VISIBLE_CLASS);
        self.state.set(RevealState::Revealed);
        true
    }
}
