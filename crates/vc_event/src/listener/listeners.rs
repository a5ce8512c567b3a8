use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt::Debug;

use vc_utils::hash::NoOpHashMap;

use super::{DispatcherId, ListenerId};
use crate::{EventBox, EventKind};

type ListenerList = Rc<Vec<Rc<Listener>>>;

// -----------------------------------------------------------------------------
// Listener

/// One registered callback.
pub struct Listener {
    id: ListenerId,
    live: Cell<bool>,
    callback: Box<dyn Fn(&EventBox)>,
}

impl Listener {
    #[inline]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Returns `false` once the listener has been unregistered.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    /// Invokes the callback unless the listener has been unregistered.
    ///
    /// Returns whether the callback ran.
    #[inline]
    pub fn call(&self, event: &EventBox) -> bool {
        if self.live.get() {
            (self.callback)(event);
            true
        } else {
            false
        }
    }
}

impl Debug for Listener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("live", &self.live.get())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// ListenerSnapshot

/// The listeners of one kind at the moment the snapshot was taken, in
/// registration order.
///
/// Listeners registered afterwards are not part of the snapshot. Listeners
/// unregistered afterwards stay in it but no longer run.
#[derive(Default, Clone)]
pub struct ListenerSnapshot {
    list: Option<ListenerList>,
}

impl ListenerSnapshot {
    /// Returns the number of listeners captured, live or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.as_ref().map_or(0, |list| list.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Listener> {
        self.list.iter().flat_map(|list| list.iter().map(|l| &**l))
    }

    /// Returns the handles of the captured listeners that are still live.
    pub fn ids(&self) -> impl Iterator<Item = ListenerId> + '_ {
        self.iter().filter(|l| l.is_live()).map(Listener::id)
    }

    /// Calls every live listener with `event`, in registration order.
    ///
    /// Returns how many callbacks ran.
    pub fn deliver(&self, event: &EventBox) -> usize {
        self.iter().filter(|l| l.call(event)).count()
    }
}

impl Debug for ListenerSnapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Listeners

/// The listener registry of one dispatcher.
///
/// Every method takes `&self`: a callback that holds a reference to the
/// registry can register or unregister listeners while it is being run.
/// No internal borrow is held while user code executes.
///
/// Each kind owns a copy-on-write list. Taking a [`ListenerSnapshot`] is a
/// reference count bump; a registration made while a snapshot is alive copies
/// the list of that kind once.
pub struct Listeners {
    owner: DispatcherId,
    next: Cell<u64>,
    lists: RefCell<NoOpHashMap<EventKind, ListenerList>>,
}

impl Listeners {
    /// Creates an empty registry issuing handles on behalf of `owner`.
    pub fn new(owner: DispatcherId) -> Self {
        Self {
            owner,
            next: Cell::new(0),
            lists: RefCell::new(NoOpHashMap::default()),
        }
    }

    #[inline]
    pub fn owner(&self) -> DispatcherId {
        self.owner
    }

    /// Appends `callback` to the listeners of `kind` and returns its handle.
    pub fn register(&self, kind: EventKind, callback: impl Fn(&EventBox) + 'static) -> ListenerId {
        let index = self.next.get();
        assert!(index < u64::MAX, "too many listeners");
        self.next.set(index + 1);

        let id = ListenerId::new(self.owner, index);
        let listener = Rc::new(Listener {
            id,
            live: Cell::new(true),
            callback: Box::new(callback),
        });

        let mut lists = self.lists.borrow_mut();
        Rc::make_mut(lists.entry(kind).or_default()).push(listener);

        log::debug!("registered listener {id} for event kind {kind} ({})", kind.name());
        id
    }

    /// Removes the listener `id` from `kind`.
    ///
    /// Returns `false`, changing nothing, if there is no such listener: the
    /// handle was already removed, belongs to another kind, or was issued by
    /// another dispatcher.
    pub fn unregister(&self, kind: EventKind, id: ListenerId) -> bool {
        if id.owner() != self.owner {
            log::warn!(
                "listener {id} was issued by dispatcher {}, not {}; ignoring removal",
                id.owner(),
                self.owner,
            );
            return false;
        }

        // Dropped after the borrow ends: the callback may own values whose
        // destructors call back into this registry.
        let removed = {
            let mut lists = self.lists.borrow_mut();
            let Some(list) = lists.get_mut(&kind) else {
                return false;
            };
            let Some(index) = list.iter().position(|l| l.id == id) else {
                return false;
            };

            let removed = Rc::make_mut(list).remove(index);
            removed.live.set(false);
            if list.is_empty() {
                lists.remove(&kind);
            }
            removed
        };

        log::debug!("unregistered listener {id} from event kind {kind}");
        drop(removed);
        true
    }

    /// Returns the current listeners of `kind` in registration order.
    ///
    /// A kind nobody listens to yields an empty snapshot.
    #[inline]
    pub fn snapshot(&self, kind: EventKind) -> ListenerSnapshot {
        ListenerSnapshot {
            list: self.lists.borrow().get(&kind).cloned(),
        }
    }

    /// Returns the number of listeners registered for `kind`.
    pub fn len(&self, kind: EventKind) -> usize {
        self.lists.borrow().get(&kind).map_or(0, |list| list.len())
    }

    /// Returns the number of listeners across all kinds.
    pub fn total(&self) -> usize {
        self.lists.borrow().values().map(|list| list.len()).sum()
    }

    /// Unregisters every listener and returns how many were removed.
    pub fn clear(&self) -> usize {
        let lists = core::mem::take(&mut *self.lists.borrow_mut());

        let mut count = 0;
        for listener in lists.values().flat_map(|list| list.iter()) {
            listener.live.set(false);
            count += 1;
        }
        count
    }
}

impl Debug for Listeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("owner", &self.owner)
            .field("next", &self.next.get())
            .field("total", &self.total())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::Listeners;
    use crate::listener::DispatcherIdAllocator;
    use crate::{Event, EventBox, EventKind};

    #[derive(Clone)]
    struct Ping;
    #[derive(Clone)]
    struct Pong;

    impl Event for Ping {}
    impl Event for Pong {}

    fn registry() -> Listeners {
        static IDS: DispatcherIdAllocator = DispatcherIdAllocator::new();
        Listeners::new(IDS.alloc())
    }

    fn recorder(
        log: &Rc<RefCell<Vec<&'static str>>>,
        tag: &'static str,
    ) -> impl Fn(&EventBox) + 'static {
        let log = log.clone();
        move |_| log.borrow_mut().push(tag)
    }

    #[test]
    fn handles_are_unique_across_kinds() {
        let listeners = registry();
        let a = listeners.register(Ping::kind(), |_| {});
        let b = listeners.register(Pong::kind(), |_| {});
        let c = listeners.register(Ping::kind(), |_| {});

        assert!(a.index() < b.index());
        assert!(b.index() < c.index());
        assert_eq!(listeners.len(Ping::kind()), 2);
        assert_eq!(listeners.total(), 3);
    }

    #[test]
    fn snapshot_keeps_registration_order() {
        let listeners = registry();
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = listeners.register(Ping::kind(), recorder(&log, "first"));
        let second = listeners.register(Ping::kind(), recorder(&log, "second"));
        let third = listeners.register(Ping::kind(), recorder(&log, "third"));
        assert!(listeners.unregister(Ping::kind(), second));

        let snapshot = listeners.snapshot(Ping::kind());
        assert_eq!(snapshot.ids().collect::<Vec<_>>(), [first, third]);
        assert_eq!(snapshot.deliver(&EventBox::from_event(Ping)), 2);
        assert_eq!(*log.borrow(), ["first", "third"]);
    }

    #[test]
    fn unknown_kind_is_empty() {
        #[derive(Clone)]
        struct Never;
        impl Event for Never {}

        let listeners = registry();
        let snapshot = listeners.snapshot(EventKind::of::<Never>());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.deliver(&EventBox::from_event(Never)), 0);
    }

    #[test]
    fn unregister_is_idempotent() {
        let listeners = registry();
        let id = listeners.register(Ping::kind(), |_| {});
        let other = listeners.register(Ping::kind(), |_| {});

        assert!(listeners.unregister(Ping::kind(), id));
        assert!(!listeners.unregister(Ping::kind(), id));
        assert!(!listeners.unregister(Pong::kind(), other));
        assert_eq!(listeners.snapshot(Ping::kind()).ids().collect::<Vec<_>>(), [other]);
    }

    #[test]
    fn foreign_handles_are_ignored() {
        let ours = registry();
        let theirs = registry();

        let mine = ours.register(Ping::kind(), |_| {});
        let foreign = theirs.register(Ping::kind(), |_| {});
        assert_eq!(mine.index(), foreign.index());

        assert!(!ours.unregister(Ping::kind(), foreign));
        assert_eq!(ours.len(Ping::kind()), 1);
    }

    #[test]
    fn snapshot_sees_later_removal_but_not_addition() {
        let listeners = registry();
        let log = Rc::new(RefCell::new(Vec::new()));

        let early = listeners.register(Ping::kind(), recorder(&log, "early"));
        let snapshot = listeners.snapshot(Ping::kind());

        listeners.register(Ping::kind(), recorder(&log, "late"));
        listeners.unregister(Ping::kind(), early);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.deliver(&EventBox::from_event(Ping)), 0);
        assert!(log.borrow().is_empty());

        assert_eq!(listeners.snapshot(Ping::kind()).deliver(&EventBox::from_event(Ping)), 1);
        assert_eq!(*log.borrow(), ["late"]);
    }

    #[test]
    fn clear_removes_everything() {
        let listeners = registry();
        listeners.register(Ping::kind(), |_| {});
        listeners.register(Pong::kind(), |_| {});
        let snapshot = listeners.snapshot(Pong::kind());

        assert_eq!(listeners.clear(), 2);
        assert_eq!(listeners.total(), 0);
        assert_eq!(snapshot.ids().count(), 0);
    }
}
