use core::fmt::Debug;

use crate::listener::{DispatcherId, DispatcherIdAllocator, ListenerId, Listeners};
use crate::{Event, EventBox, EventKind, EventQueue};

static DISPATCHER_IDS: DispatcherIdAllocator = DispatcherIdAllocator::new();

// -----------------------------------------------------------------------------
// EventDispatcher

/// Deferred, single-threaded publish/subscribe dispatch.
///
/// [`publish`](Self::publish) stores a copy of the event; nothing runs until
/// the owner calls [`process_all`](Self::process_all) or
/// [`process_only`](Self::process_only). Each dispatched event is handed to
/// the listeners of its kind in registration order.
///
/// All methods take `&self`, so listeners that captured a reference to the
/// dispatcher can publish, register and unregister from inside a callback:
///
/// - events published during `process_all` are dispatched by the same call;
/// - a listener registered while an event is being delivered first runs for
///   the next event;
/// - a listener unregistered while an event is being delivered does not run
///   for the rest of that delivery.
///
/// The dispatcher is neither `Send` nor `Sync`.
///
/// # Examples
///
/// ```
/// use core::cell::Cell;
/// use vc_event::{Event, EventDispatcher};
///
/// #[derive(Clone)]
/// struct Damage(u32);
/// impl Event for Damage {}
///
/// let health = std::rc::Rc::new(Cell::new(100));
/// let dispatcher = EventDispatcher::new();
///
/// let target = health.clone();
/// let id = dispatcher.add_listener(move |hit: &Damage| target.set(target.get() - hit.0));
///
/// dispatcher.publish(&Damage(30));
/// dispatcher.process_all();
/// assert_eq!(health.get(), 70);
///
/// dispatcher.remove_listener(Damage::kind(), id);
/// dispatcher.publish(&Damage(30));
/// dispatcher.process_all();
/// assert_eq!(health.get(), 70);
/// ```
pub struct EventDispatcher {
    listeners: Listeners,
    queue: EventQueue,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a dispatcher whose queue has room for `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            listeners: Listeners::new(DISPATCHER_IDS.alloc()),
            queue: EventQueue::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn id(&self) -> DispatcherId {
        self.listeners.owner()
    }

    #[inline]
    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    #[inline]
    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    // -------------------------------------------------------------------------
    // Listeners

    /// Registers a listener for events of type `E`.
    pub fn add_listener<E: Event>(&self, listener: impl Fn(&E) + 'static) -> ListenerId {
        self.listeners
            .register(E::kind(), move |event| match event.get::<E>() {
                Ok(event) => listener(event),
                Err(e) => log::error!("listener skipped: {e}"),
            })
    }

    /// Registers a listener that receives the boxed events of `kind`.
    pub fn add_raw_listener(
        &self,
        kind: EventKind,
        listener: impl Fn(&EventBox) + 'static,
    ) -> ListenerId {
        self.listeners.register(kind, listener)
    }

    /// Removes a listener. Unknown or already removed handles are ignored.
    ///
    /// Returns whether a listener was removed.
    #[inline]
    pub fn remove_listener(&self, kind: EventKind, id: ListenerId) -> bool {
        self.listeners.unregister(kind, id)
    }

    /// Returns the number of listeners registered for `kind`.
    #[inline]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.len(kind)
    }

    // -------------------------------------------------------------------------
    // Publishing

    /// Queues a copy of `event`.
    #[inline]
    pub fn publish<E: Event>(&self, event: &E) {
        self.publish_boxed(EventBox::new(event));
    }

    /// Queues `event`, taking ownership of it.
    #[inline]
    pub fn publish_owned<E: Event>(&self, event: E) {
        self.publish_boxed(EventBox::from_event(event));
    }

    /// Queues an already boxed event.
    pub fn publish_boxed(&self, event: EventBox) {
        log::trace!("publish {} ({})", event.kind(), event.name());
        self.queue.enqueue(event);
    }

    /// Returns the number of queued events.
    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drops every queued event without dispatching it.
    pub fn discard_pending(&self) -> usize {
        let count = self.queue.clear();
        if count > 0 {
            log::debug!("discarded {count} pending event(s)");
        }
        count
    }

    // -------------------------------------------------------------------------
    // Processing

    /// Dispatches queued events until the queue is empty, including events
    /// published by listeners along the way.
    ///
    /// Returns how many events were dispatched.
    pub fn process_all(&self) -> usize {
        self.queue.drain_all(|event| self.deliver(&event))
    }

    /// Dispatches only the queued events of `kind`; all other events stay
    /// queued in their original order.
    ///
    /// Events published by listeners during this call are not dispatched by
    /// it.
    ///
    /// Returns how many events were dispatched.
    pub fn process_only(&self, kind: EventKind) -> usize {
        self.queue.drain_matching(kind, |event| self.deliver(&event))
    }

    /// Dispatches only the queued events of type `E`.
    #[inline]
    pub fn process_only_of<E: Event>(&self) -> usize {
        self.process_only(E::kind())
    }

    fn deliver(&self, event: &EventBox) {
        let snapshot = self.listeners.snapshot(event.kind());
        log::trace!(
            "dispatch {} ({}) to {} listener(s)",
            event.kind(),
            event.name(),
            snapshot.len(),
        );
        snapshot.deliver(event);
    }
}

impl Default for EventDispatcher {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for EventDispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("id", &self.id())
            .field("listeners", &self.listeners.total())
            .field("pending", &self.queue.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
