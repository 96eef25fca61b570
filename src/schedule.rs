use std::cell::RefCell;

/// Delayed callbacks on the UI event loop.
///
/// Dropping a handle returned by [`Scheduler::schedule`] cancels the task if
/// it has not run yet.
pub trait Scheduler: Clone + 'static {
    type Handle: 'static;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;

    /// Runs `task` after `delay_ms` with no way to cancel it.
    fn detach(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Per-frame callbacks; dropping the handle cancels the pending frame.
pub trait FrameScheduler: Clone + 'static {
    type Handle: 'static;

    fn request_frame(&self, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Keeps at most one task pending. Each trigger cancels the previous task
/// and restarts the delay.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: RefCell::new(None),
        }
    }

    pub fn trigger(&self, task: impl FnOnce() + 'static) {
        let handle = self.scheduler.schedule(self.delay_ms, Box::new(task));
        *self.pending.borrow_mut() = Some(handle);
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserFrames, BrowserScheduler};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{FrameScheduler, Scheduler};
    use gloo::{
        render::{request_animation_frame, AnimationFrame},
        timers::callback::Timeout,
    };

    #[derive(Clone, Copy, Default)]
    pub struct BrowserScheduler;

    impl Scheduler for BrowserScheduler {
        type Handle = Timeout;

        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
            Timeout::new(delay_ms, task)
        }

        fn detach(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            Timeout::new(delay_ms, task).forget();
        }
    }

    #[derive(Clone, Copy, Default)]
    pub struct BrowserFrames;

    impl FrameScheduler for BrowserFrames {
        type Handle = AnimationFrame;

        fn request_frame(&self, task: Box<dyn FnOnce()>) -> AnimationFrame {
            request_animation_frame(move |_timestamp| task())
        }
    }
}

#[cfg(test)]
pub(crate) mod manual {
    use super::{FrameScheduler, Scheduler};
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    struct PendingTask {
        due_ms: u64,
        sequence: u64,
        cancelled: Rc<Cell<bool>>,
        task: Box<dyn FnOnce()>,
    }

    #[derive(Default)]
    struct Clock {
        now_ms: u64,
        next_sequence: u64,
        tasks: Vec<PendingTask>,
    }

    pub(crate) struct ManualHandle {
        cancelled: Rc<Cell<bool>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    /// Virtual clock: tasks only run inside [`ManualScheduler::advance`].
    #[derive(Clone, Default)]
    pub(crate) struct ManualScheduler {
        clock: Rc<RefCell<Clock>>,
    }

    impl ManualScheduler {
        fn push(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Rc<Cell<bool>> {
            let mut clock = self.clock.borrow_mut();
            let cancelled = Rc::new(Cell::new(false));
            let sequence = clock.next_sequence;
            clock.next_sequence += 1;
            let due_ms = clock.now_ms + u64::from(delay_ms);
            clock.tasks.push(PendingTask {
                due_ms,
                sequence,
                cancelled: Rc::clone(&cancelled),
                task,
            });
            cancelled
        }

        pub(crate) fn now_ms(&self) -> u64 {
            self.clock.borrow().now_ms
        }

        pub(crate) fn pending(&self) -> usize {
            self.clock
                .borrow()
                .tasks
                .iter()
                .filter(|task| !task.cancelled.get())
                .count()
        }

        /// Moves the clock forward, running due tasks in order. Tasks
        /// scheduled while advancing run too if they fall inside the window.
        pub(crate) fn advance(&self, delta_ms: u64) {
            let target = self.now_ms() + delta_ms;
            loop {
                let next = {
                    let mut clock = self.clock.borrow_mut();
                    let position = clock
                        .tasks
                        .iter()
                        .enumerate()
                        .filter(|(_, task)| task.due_ms <= target)
                        .min_by_key(|(_, task)| (task.due_ms, task.sequence))
                        .map(|(index, _)| index);
                    position.map(|index| {
                        let task = clock.tasks.remove(index);
                        clock.now_ms = task.due_ms;
                        task
                    })
                };

                let Some(next) = next else {
                    break;
                };
                if !next.cancelled.get() {
                    (next.task)();
                }
            }
            self.clock.borrow_mut().now_ms = target;
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
            ManualHandle {
                cancelled: self.push(delay_ms, task),
            }
        }

        fn detach(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            self.push(delay_ms, task);
        }
    }

    /// Frame source that only ticks when the test asks it to.
    #[derive(Clone, Default)]
    pub(crate) struct ManualFrames {
        queue: Rc<RefCell<Vec<(Rc<Cell<bool>>, Box<dyn FnOnce()>)>>>,
    }

    impl ManualFrames {
        pub(crate) fn pending(&self) -> usize {
            self.queue
                .borrow()
                .iter()
                .filter(|(cancelled, _)| !cancelled.get())
                .count()
        }

        /// Runs every callback queued before this frame started.
        pub(crate) fn run_frame(&self) {
            let queued = std::mem::take(&mut *self.queue.borrow_mut());
            for (cancelled, task) in queued {
                if !cancelled.get() {
                    task();
                }
            }
        }
    }

    impl FrameScheduler for ManualFrames {
        type Handle = ManualHandle;

        fn request_frame(&self, task: Box<dyn FnOnce()>) -> ManualHandle {
            let cancelled = Rc::new(Cell::new(false));
            self.queue
                .borrow_mut()
                .push((Rc::clone(&cancelled), task));
            ManualHandle { cancelled }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::manual::ManualScheduler;
    use super::*;
    use std::{cell::Cell, rc::Rc};

    #[test]
    fn debouncer_runs_once_after_a_burst() {
        let scheduler = ManualScheduler::default();
        let debouncer = Debouncer::new(scheduler.clone(), 250);
        let fired = Rc::new(Cell::new(0));

        for _ in 0..5 {
            let fired = Rc::clone(&fired);
            debouncer.trigger(move || fired.set(fired.get() + 1));
            scheduler.advance(40);
        }
        assert_eq!(fired.get(), 0);

        scheduler.advance(250);
        assert_eq!(fired.get(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn debouncer_fires_again_for_a_later_burst() {
        let scheduler = ManualScheduler::default();
        let debouncer = Debouncer::new(scheduler.clone(), 250);
        let fired = Rc::new(Cell::new(0));

        let first = Rc::clone(&fired);
        debouncer.trigger(move || first.set(first.get() + 1));
        scheduler.advance(300);

        let second = Rc::clone(&fired);
        debouncer.trigger(move || second.set(second.get() + 1));
        scheduler.advance(249);
        assert_eq!(fired.get(), 1);
        scheduler.advance(1);
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn detached_tasks_can_chain() {
        let scheduler = ManualScheduler::default();
        let hits = Rc::new(Cell::new(0));

        let chained = scheduler.clone();
        let counter = Rc::clone(&hits);
        scheduler.detach(
            10,
            Box::new(move || {
                counter.set(counter.get() + 1);
                let counter = Rc::clone(&counter);
                chained.detach(10, Box::new(move || counter.set(counter.get() + 1)));
            }),
        );

        scheduler.advance(20);
        assert_eq!(hits.get(), 2);
        assert_eq!(scheduler.now_ms(), 20);
    }
}
