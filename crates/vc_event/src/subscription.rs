use alloc::vec::Vec;
use core::fmt::Debug;

use crate::{Event, EventBox, EventDispatcher, EventKind, ListenerId};

// -----------------------------------------------------------------------------
// Subscriptions

/// The listeners one consumer registered on a dispatcher.
///
/// Every listener added through a `Subscriptions` is removed again when it is
/// dropped, so a consumer that stores one next to its state cannot be called
/// after it is gone.
///
/// # Examples
///
/// ```
/// use core::cell::Cell;
/// use std::rc::Rc;
/// use vc_event::{Event, EventDispatcher, Subscriptions};
///
/// #[derive(Clone)]
/// struct Tick;
/// impl Event for Tick {}
///
/// let dispatcher = EventDispatcher::new();
/// let ticks = Rc::new(Cell::new(0));
///
/// {
///     let mut subscriptions = Subscriptions::new(&dispatcher);
///     let counter = ticks.clone();
///     subscriptions.listen(move |_: &Tick| counter.set(counter.get() + 1));
///
///     dispatcher.publish(&Tick);
///     dispatcher.process_all();
/// }
///
/// dispatcher.publish(&Tick);
/// dispatcher.process_all();
/// assert_eq!(ticks.get(), 1);
/// ```
pub struct Subscriptions<'d> {
    dispatcher: &'d EventDispatcher,
    entries: Vec<(EventKind, ListenerId)>,
}

impl<'d> Subscriptions<'d> {
    pub fn new(dispatcher: &'d EventDispatcher) -> Self {
        Self {
            dispatcher,
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn dispatcher(&self) -> &'d EventDispatcher {
        self.dispatcher
    }

    /// Registers a listener for `E` and remembers it.
    pub fn listen<E: Event>(&mut self, listener: impl Fn(&E) + 'static) -> ListenerId {
        let id = self.dispatcher.add_listener(listener);
        self.entries.push((E::kind(), id));
        id
    }

    /// Registers a listener for the boxed events of `kind` and remembers it.
    pub fn listen_raw(
        &mut self,
        kind: EventKind,
        listener: impl Fn(&EventBox) + 'static,
    ) -> ListenerId {
        let id = self.dispatcher.add_raw_listener(kind, listener);
        self.entries.push((kind, id));
        id
    }

    /// Returns the registered `(kind, handle)` pairs in registration order.
    #[inline]
    pub fn entries(&self) -> &[(EventKind, ListenerId)] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every remembered listener from the dispatcher.
    ///
    /// Returns how many were still registered.
    pub fn cancel_all(&mut self) -> usize {
        let dispatcher = self.dispatcher;
        self.entries
            .drain(..)
            .filter(|&(kind, id)| dispatcher.remove_listener(kind, id))
            .count()
    }
}

impl Drop for Subscriptions<'_> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

impl Debug for Subscriptions<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscriptions")
            .field("dispatcher", &self.dispatcher.id())
            .field("entries", &self.entries)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::Cell;

    use super::Subscriptions;
    use crate::{Event, EventBox, EventDispatcher};

    #[derive(Clone)]
    struct Opened;
    #[derive(Clone)]
    struct Closed;

    impl Event for Opened {}
    impl Event for Closed {}

    #[test]
    fn drop_unregisters_everything() {
        let dispatcher = EventDispatcher::new();
        let calls = Rc::new(Cell::new(0));

        let mut subscriptions = Subscriptions::new(&dispatcher);
        let counter = calls.clone();
        subscriptions.listen(move |_: &Opened| counter.set(counter.get() + 1));
        let counter = calls.clone();
        subscriptions.listen_raw(Closed::kind(), move |_: &EventBox| {
            counter.set(counter.get() + 1);
        });

        assert_eq!(subscriptions.len(), 2);
        assert_eq!(subscriptions.entries()[1].0, Closed::kind());
        assert_eq!(dispatcher.listener_count(Opened::kind()), 1);

        drop(subscriptions);
        assert_eq!(dispatcher.listener_count(Opened::kind()), 0);
        assert_eq!(dispatcher.listener_count(Closed::kind()), 0);

        dispatcher.publish(&Opened);
        dispatcher.publish(&Closed);
        dispatcher.process_all();
        assert_eq!(calls.get(), 0);
        assert_eq!(Rc::strong_count(&calls), 1);
    }

    #[test]
    fn cancel_all_counts_live_listeners() {
        let dispatcher = EventDispatcher::new();
        let mut subscriptions = Subscriptions::new(&dispatcher);

        let opened = subscriptions.listen(|_: &Opened| {});
        subscriptions.listen(|_: &Closed| {});
        dispatcher.remove_listener(Opened::kind(), opened);

        assert_eq!(subscriptions.cancel_all(), 1);
        assert!(subscriptions.is_empty());
        assert_eq!(subscriptions.cancel_all(), 0);
    }

    #[test]
    fn other_listeners_survive() {
        let dispatcher = EventDispatcher::new();
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        dispatcher.add_listener(move |_: &Opened| counter.set(counter.get() + 1));

        {
            let mut subscriptions = Subscriptions::new(&dispatcher);
            subscriptions.listen(|_: &Opened| {});
        }

        dispatcher.publish(&Opened);
        dispatcher.process_all();
        assert_eq!(calls.get(), 1);
    }
}
