//! Single-owner publish/subscribe value cell.
//!
//! [`Observable`] holds one value and notifies registered subscribers
//! synchronously when it changes. It is the primitive the node models use
//! to push backend state into a renderer without the renderer polling.
//!
//! Two policies are fixed here and relied on by the rest of the crate:
//!
//! - **Notify on change only.** [`Observable::set`] compares the new value
//!   against the current one and publishes nothing when they are equal, so
//!   a backend that resends an unchanged state does not trigger redraws.
//! - **No re-entrant mutation.** `set` takes `&mut self`; a subscriber
//!   callback can never hold a second mutable path to the same cell, so
//!   re-entrant `set` calls are rejected at compile time rather than
//!   queued or interleaved.
//!
//! Notifications are not buffered: a subscriber registered after a `set`
//! never observes that change, it only sees the current value via
//! [`Observable::get`].

use derive_more::{Debug, Display};
use uuid::Uuid;

/// Handle identifying one subscription on an [`Observable`].
///
/// Returned by [`Observable::subscribe`]; pass it to
/// [`Observable::unsubscribe`] to stop receiving notifications.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Debug, Display)]
#[debug("{_0}")]
#[display("{_0}")]
pub struct Subscription(Uuid);

impl Subscription {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

struct Subscriber<T> {
    id: Subscription,
    callback: Box<dyn Fn(&T)>,
}

/// A value cell that notifies subscribers on change.
///
/// The cell is owned exclusively by the model that exposes it; there is no
/// global subscriber registry. Subscribers are invoked synchronously, in
/// subscription order, and `set` returns only after every callback has
/// returned.
pub struct Observable<T> {
    value: T,
    subscribers: Vec<Subscriber<T>>,
}

impl<T> Observable<T> {
    /// Creates a cell holding `value`, with no subscribers.
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
        }
    }

    /// Returns the current value.
    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Registers a callback invoked on every published change.
    ///
    /// The callback never observes changes published before registration.
    pub fn subscribe(&mut self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = Subscription::new();
        self.subscribers.push(Subscriber {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Removes a subscription.
    ///
    /// Idempotent: returns `true` when the subscription was present,
    /// `false` when it was already removed. A removed subscription never
    /// receives further notifications.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != subscription);
        self.subscribers.len() != before
    }

    /// Returns the number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: PartialEq> Observable<T> {
    /// Replaces the value, notifying subscribers when it changed.
    ///
    /// Returns whether a change was published. Setting a value equal to
    /// the current one publishes nothing and returns `false`.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        for subscriber in &self.subscribers {
            (subscriber.callback)(&self.value);
        }
        true
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Observable<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("subscriber_count", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_get_returns_current_value() {
        let mut cell = Observable::new(1);
        assert_eq!(*cell.get(), 1);
        cell.set(2);
        assert_eq!(*cell.get(), 2);
    }

    #[test]
    fn test_subscribers_notified_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut cell = Observable::new("pending".to_string());

        let first = Rc::clone(&seen);
        cell.subscribe(move |v: &String| first.borrow_mut().push(format!("a:{v}")));
        let second = Rc::clone(&seen);
        cell.subscribe(move |v: &String| second.borrow_mut().push(format!("b:{v}")));

        cell.set("running".to_string());
        cell.set("finished".to_string());

        assert_eq!(
            *seen.borrow(),
            vec!["a:running", "b:running", "a:finished", "b:finished"]
        );
    }

    #[test]
    fn test_late_subscriber_misses_earlier_changes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut cell = Observable::new("pending".to_string());

        cell.set("running".to_string());

        let sink = Rc::clone(&seen);
        cell.subscribe(move |v: &String| sink.borrow_mut().push(v.clone()));
        cell.set("finished".to_string());

        assert_eq!(*seen.borrow(), vec!["finished"]);
    }

    #[test]
    fn test_set_equal_value_publishes_nothing() {
        let count = Rc::new(RefCell::new(0));
        let mut cell = Observable::new(5);

        let sink = Rc::clone(&count);
        cell.subscribe(move |_| *sink.borrow_mut() += 1);

        assert!(!cell.set(5));
        assert_eq!(*count.borrow(), 0);
        assert!(cell.set(6));
        assert!(!cell.set(6));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let count = Rc::new(RefCell::new(0));
        let mut cell = Observable::new(0);

        let sink = Rc::clone(&count);
        let subscription = cell.subscribe(move |_| *sink.borrow_mut() += 1);

        cell.set(1);
        assert!(cell.unsubscribe(subscription));
        assert!(!cell.unsubscribe(subscription));
        cell.set(2);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn test_independent_cells_do_not_share_state() {
        let mut first = Observable::new("pending".to_string());
        let mut second = Observable::new("pending".to_string());

        first.set("running".to_string());

        assert_eq!(first.get().as_str(), "running");
        assert_eq!(second.get().as_str(), "pending");
        second.set("error".to_string());
        assert_eq!(first.get().as_str(), "running");
    }
}
