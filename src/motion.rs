use crate::{
    schedule::{FrameScheduler, Scheduler},
    surface::Surface,
};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

pub const ORB_SELECTOR: &str = ".rotating-cube";
pub const SUBTITLE_SELECTOR: &str = ".hero-subtitle";

const ORB_PHASE_STEP: f64 = 0.005;
const ORB_AMPLITUDE_Y: f64 = 20.0;
const ORB_AMPLITUDE_X: f64 = 10.0;

pub const TYPING_START_DELAY_MS: u32 = 300;
pub const TYPING_CHAR_INTERVAL_MS: u32 = 40;

/// Phase accumulator for the floating orb.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbFloat {
    phase: f64,
}

impl OrbFloat {
    /// Advances one frame and returns the `(x, y)` offset in pixels.
    pub fn advance(&mut self) -> (f64, f64) {
        self.phase += ORB_PHASE_STEP;
        (
            (self.phase * 0.5).cos() * ORB_AMPLITUDE_X,
            self.phase.sin() * ORB_AMPLITUDE_Y,
        )
    }
}

pub fn orb_transform((x, y): (f64, f64)) -> String {
    format!("translate({x}px, {y}px)")
}

struct OrbLoop<F: FrameScheduler, E: Surface> {
    frames: F,
    element: E,
    orb: Cell<OrbFloat>,
    running: Cell<bool>,
    pending: RefCell<Option<F::Handle>>,
}

impl<F: FrameScheduler, E: Surface> OrbLoop<F, E> {
    fn tick(self: &Rc<Self>) {
        self.pending.borrow_mut().take();
        if !self.running.get() {
            return;
        }

        let mut orb = self.orb.get();
        let offset = orb.advance();
        self.orb.set(orb);
        self.element.set_style("transform", &orb_transform(offset));

        let next = Rc::clone(self);
        let handle = self.frames.request_frame(Box::new(move || next.tick()));
        *self.pending.borrow_mut() = Some(handle);
    }

    fn stop(&self) {
        self.running.set(false);
        self.pending.borrow_mut().take();
    }
}

/// Keeps the orb floating until stopped or dropped.
pub struct OrbAnimation<F: FrameScheduler, E: Surface> {
    inner: Rc<OrbLoop<F, E>>,
}

impl<F: FrameScheduler, E: Surface> OrbAnimation<F, E> {
    /// Positions the orb right away, then once per frame.
    pub fn start(frames: F, element: E) -> Self {
        let inner = Rc::new(OrbLoop {
            frames,
            element,
            orb: Cell::new(OrbFloat::default()),
            running: Cell::new(true),
            pending: RefCell::new(None),
        });
        inner.tick();
        Self { inner }
    }

    pub fn stop(&self) {
        self.inner.stop();
    }
}

impl<F: FrameScheduler, E: Surface> Drop for OrbAnimation<F, E> {
    fn drop(&mut self) {
        self.inner.stop();
    }
}

struct Typing<S: Scheduler, E: Surface> {
    scheduler: S,
    element: E,
    chars: Vec<char>,
    revealed: Cell<usize>,
}

impl<S: Scheduler, E: Surface> Typing<S, E> {
    fn type_next(self: Rc<Self>) {
        let revealed = self.revealed.get();
        if revealed >= self.chars.len() {
            return;
        }

        let revealed = revealed + 1;
        self.revealed.set(revealed);
        let visible: String = self.chars[..revealed].iter().collect();
        self.element.set_text(&visible);

        if revealed < self.chars.len() {
            let scheduler = self.scheduler.clone();
            scheduler.detach(TYPING_CHAR_INTERVAL_MS, Box::new(move || self.type_next()));
        }
    }
}

/// Clears the subtitle and types it back one character at a time.
pub fn start_typing<S: Scheduler, E: Surface>(scheduler: &S, element: E) {
    let chars: Vec<char> = element.text().chars().collect();
    element.set_text("");
    element.set_style("opacity", "1");

    let typing = Rc::new(Typing {
        scheduler: scheduler.clone(),
        element,
        chars,
        revealed: Cell::new(0),
    });
    scheduler.detach(TYPING_START_DELAY_MS, Box::new(move || typing.type_next()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        schedule::manual::{ManualFrames, ManualScheduler},
        surface::testing::RecordingSurface,
    };

    #[test]
    fn orb_offsets_follow_phase() {
        let mut orb = OrbFloat::default();
        let (x, y) = orb.advance();

        assert!((x - (0.0025_f64).cos() * 10.0).abs() < 1e-12);
        assert!((y - (0.005_f64).sin() * 20.0).abs() < 1e-12);

        for _ in 0..1_000 {
            let (x, y) = orb.advance();
            assert!(x.abs() <= 10.0);
            assert!(y.abs() <= 20.0);
        }
    }

    #[test]
    fn orb_moves_every_frame_until_stopped() {
        let frames = ManualFrames::default();
        let element = RecordingSurface::default();
        let animation = OrbAnimation::start(frames.clone(), element.clone());

        let first = element.style("transform");
        assert!(first.starts_with("translate("));
        assert_eq!(frames.pending(), 1);

        frames.run_frame();
        frames.run_frame();
        let moved = element.style("transform");
        assert_ne!(moved, first);

        animation.stop();
        assert_eq!(frames.pending(), 0);
        frames.run_frame();
        assert_eq!(element.style("transform"), moved);
    }

    #[test]
    fn dropping_the_animation_cancels_the_next_frame() {
        let frames = ManualFrames::default();
        let animation = OrbAnimation::start(frames.clone(), RecordingSurface::default());
        drop(animation);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn typing_starts_after_delay_and_finishes_on_cadence() {
        let scheduler = ManualScheduler::default();
        let text = "Security Engineer";
        let element = RecordingSurface::with_text(text);

        start_typing(&scheduler, element.clone());
        assert_eq!(element.text(), "");
        assert_eq!(element.style("opacity"), "1");

        scheduler.advance(u64::from(TYPING_START_DELAY_MS) - 1);
        assert_eq!(element.text(), "");

        scheduler.advance(1);
        assert_eq!(element.text(), "S");

        scheduler.advance(u64::from(TYPING_CHAR_INTERVAL_MS) * text.len() as u64);
        assert_eq!(element.text(), text);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn typing_counts_characters_not_bytes() {
        let scheduler = ManualScheduler::default();
        let element = RecordingSurface::with_text("héllo ✨");

        start_typing(&scheduler, element.clone());
        scheduler.advance(u64::from(TYPING_START_DELAY_MS + TYPING_CHAR_INTERVAL_MS));
        assert_eq!(element.text(), "hé");

        scheduler.advance(10_000);
        assert_eq!(element.text(), "héllo ✨");
        // one clear plus one write per character
        assert_eq!(element.text_writes(), 1 + 7);
    }

    #[test]
    fn empty_subtitle_types_nothing() {
        let scheduler = ManualScheduler::default();
        let element = RecordingSurface::with_text("");

        start_typing(&scheduler, element.clone());
        scheduler.advance(1_000);
        assert_eq!(element.text(), "");
        assert_eq!(element.text_writes(), 1);
    }
}
