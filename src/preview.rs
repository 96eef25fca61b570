use crate::{
    reveal::ObserverOptions,
    schedule::{Debouncer, Scheduler},
    surface::Surface,
};
use std::{cell::Cell, rc::Rc};

pub const PREVIEW_SELECTOR: &str = ".project-preview";
pub const PREVIEW_CARD_SELECTOR: &str = ".project-card";
pub const LOADED_ATTRIBUTE: &str = "data-loaded";

pub const PREVIEW_OBSERVER: ObserverOptions = ObserverOptions {
    threshold: 0.0,
    root_margin: "100px",
};

pub const RESIZE_DEBOUNCE_MS: u32 = 250;

pub const RESET_TRANSFORM: &str = "scale(0.25) translateY(0)";
pub const IDLE_TRANSITION: &str = "transform 8s cubic-bezier(0.25, 0.46, 0.45, 0.94)";

/// How a preview returns to its resting scale before the slow transition is
/// armed again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetPlan {
    pub transition: &'static str,
    pub rearm_after_ms: u32,
}

pub const RESIZE_RESET: ResetPlan = ResetPlan {
    transition: "none",
    rearm_after_ms: 100,
};

pub const LEAVE_RESET: ResetPlan = ResetPlan {
    transition: "transform 0.6s ease",
    rearm_after_ms: 600,
};

pub fn reset_scale<S: Scheduler, E: Surface>(element: &E, scheduler: &S, plan: ResetPlan) {
    element.set_style("transition", plan.transition);
    element.set_style("transform", RESET_TRANSFORM);

    let element = element.clone();
    scheduler.detach(
        plan.rearm_after_ms,
        Box::new(move || element.set_style("transition", IDLE_TRANSITION)),
    );
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
}

/// An embedded preview frame and its one-way load marker.
pub struct PreviewFrame<E: Surface> {
    element: E,
    load: Cell<LoadState>,
}

impl<E: Surface> PreviewFrame<E> {
    pub fn new(element: E) -> Self {
        Self {
            element,
            load: Cell::new(LoadState::Pending),
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    /// Marks the frame loaded the first time it nears the viewport.
    pub fn observe(&self, is_intersecting: bool) -> bool {
        if !is_intersecting || self.load.get() == LoadState::Loaded {
            return false;
        }
        self.element.set_attribute(LOADED_ATTRIBUTE, "true");
        self.load.set(LoadState::Loaded);
        true
    }

    /// Called when the embedded document finished loading. From then on the
    /// frame ignores the pointer for good.
    pub fn content_loaded(&self) {
        self.element.set_style("pointer-events", "none");
    }
}

/// Resets every preview once the viewport stops resizing.
pub struct PreviewResizer<S: Scheduler, E: Surface> {
    scheduler: S,
    frames: Rc<Vec<PreviewFrame<E>>>,
    debounce: Debouncer<S>,
}

impl<S: Scheduler, E: Surface> PreviewResizer<S, E> {
    pub fn new(scheduler: S, frames: Rc<Vec<PreviewFrame<E>>>) -> Self {
        Self {
            debounce: Debouncer::new(scheduler.clone(), RESIZE_DEBOUNCE_MS),
            scheduler,
            frames,
        }
    }

    pub fn on_resize(&self) {
        let scheduler = self.scheduler.clone();
        let frames = Rc::clone(&self.frames);
        self.debounce.trigger(move || {
            for frame in frames.iter() {
                reset_scale(frame.element(), &scheduler, RESIZE_RESET);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{schedule::manual::ManualScheduler, surface::testing::RecordingSurface};

    fn frames(count: usize) -> (Vec<RecordingSurface>, Rc<Vec<PreviewFrame<RecordingSurface>>>) {
        let elements: Vec<_> = (0..count).map(|_| RecordingSurface::default()).collect();
        let frames = elements.iter().cloned().map(PreviewFrame::new).collect();
        (elements, Rc::new(frames))
    }

    #[test]
    fn burst_of_resizes_resets_each_preview_once() {
        let scheduler = ManualScheduler::default();
        let (elements, frames) = frames(2);
        let resizer = PreviewResizer::new(scheduler.clone(), frames);

        for _ in 0..5 {
            resizer.on_resize();
            scheduler.advance(30);
        }
        scheduler.advance(RESIZE_DEBOUNCE_MS as u64);

        for element in &elements {
            assert_eq!(element.style_writes("transition", "none"), 1);
            assert_eq!(element.style("transform"), RESET_TRANSFORM);
            assert_eq!(element.style_writes("transition", IDLE_TRANSITION), 0);
        }

        scheduler.advance(100);
        for element in &elements {
            assert_eq!(element.style_writes("transition", IDLE_TRANSITION), 1);
            assert_eq!(element.style("transition"), IDLE_TRANSITION);
        }
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn leave_reset_eases_out_then_rearms() {
        let scheduler = ManualScheduler::default();
        let element = RecordingSurface::default();

        reset_scale(&element, &scheduler, LEAVE_RESET);
        assert_eq!(element.style("transition"), "transform 0.6s ease");
        assert_eq!(element.style("transform"), RESET_TRANSFORM);

        scheduler.advance(599);
        assert_eq!(element.style("transition"), "transform 0.6s ease");
        scheduler.advance(1);
        assert_eq!(element.style("transition"), IDLE_TRANSITION);
    }

    #[test]
    fn loaded_marker_is_set_once() {
        let element = RecordingSurface::default();
        let frame = PreviewFrame::new(element.clone());

        assert!(!frame.observe(false));
        assert_eq!(element.attribute(LOADED_ATTRIBUTE), None);
        assert!(frame.observe(true));
        assert!(!frame.observe(true));
        assert_eq!(element.attribute(LOADED_ATTRIBUTE).as_deref(), Some("true"));
    }

    #[test]
    fn content_load_locks_pointer() {
        let element = RecordingSurface::default();
        let frame = PreviewFrame::new(element.clone());
        frame.observe(true);
        assert_eq!(element.style("pointer-events"), "");

        frame.content_loaded();
        assert_eq!(element.style("pointer-events"), "none");
    }
}
