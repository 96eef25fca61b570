use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

type Subscriber<T> = Rc<dyn Fn(T)>;

/// A value that notifies its subscribers every time it is set.
pub struct Signal<T: Copy + 'static> {
    value: Rc<Cell<T>>,
    subscribers: Rc<RefCell<Vec<Subscriber<T>>>>,
}

impl<T: Copy + 'static> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl<T: Copy + 'static> Signal<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: Rc::new(Cell::new(initial)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Stores `value` and calls every subscriber, in subscription order.
    pub fn set(&self, value: T) {
        self.value.set(value);
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            subscriber(value);
        }
    }

    pub fn subscribe(&self, subscriber: impl Fn(T) + 'static) -> Subscription {
        let subscriber: Subscriber<T> = Rc::new(subscriber);
        self.subscribers.borrow_mut().push(Rc::clone(&subscriber));

        let subscribers = Rc::clone(&self.subscribers);
        Subscription {
            release: Some(Box::new(move || {
                subscribers
                    .borrow_mut()
                    .retain(|item| !Rc::ptr_eq(item, &subscriber));
            })),
        }
    }
}

/// Unsubscribes when dropped.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_see_every_value_in_order() {
        let signal = Signal::new(0.0_f64);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        let _a = signal.subscribe(move |value| first.borrow_mut().push(("a", value)));
        let second = Rc::clone(&seen);
        let _b = signal.subscribe(move |value| second.borrow_mut().push(("b", value)));

        signal.set(12.0);
        signal.set(60.0);

        assert_eq!(
            *seen.borrow(),
            vec![("a", 12.0), ("b", 12.0), ("a", 60.0), ("b", 60.0)]
        );
        assert_eq!(signal.get(), 60.0);
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let signal = Signal::new(1_u8);
        let hits = Rc::new(Cell::new(0));

        let counter = Rc::clone(&hits);
        let subscription = signal.subscribe(move |_| counter.set(counter.get() + 1));
        signal.set(2);
        drop(subscription);
        signal.set(3);

        assert_eq!(hits.get(), 1);
    }
}
