use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt::{Debug, Display};
use core::hash::Hash;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use vc_utils::TypeIdMap;

use crate::{DebugName, Event};

// -----------------------------------------------------------------------------
// EventKind

/// The identity of one event type.
///
/// Kinds are handed out densely, starting at `0`, the first time a type's
/// kind is requested, and stay the same for the rest of the process. Two
/// different types never share a kind and kinds are never recycled.
///
/// The numbering depends on the order in which types are first seen. Use
/// [`register`] at startup when a stable order is wanted.
///
/// # Examples
///
/// ```
/// use vc_event::{Event, EventKind};
///
/// #[derive(Clone)]
/// struct Paused;
/// #[derive(Clone)]
/// struct Resumed;
///
/// impl Event for Paused {}
/// impl Event for Resumed {}
///
/// assert_ne!(EventKind::of::<Paused>(), EventKind::of::<Resumed>());
/// assert_eq!(EventKind::of::<Paused>(), Paused::kind());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct EventKind(u32);

impl EventKind {
    #[inline]
    pub(crate) const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the kind of event type `E`, allocating it on first use.
    #[inline]
    pub fn of<E: Event>() -> Self {
        let type_id = TypeId::of::<E>();
        let found = read_table().mapper.get(&type_id).copied();
        match found {
            Some(kind) => kind,
            None => register_internal::<E>(type_id),
        }
    }

    /// Returns the number of kinds allocated so far in this process.
    pub fn count() -> usize {
        read_table().names.len()
    }

    /// Returns the readable name of the type owning this kind.
    pub fn name(self) -> DebugName {
        read_table()
            .names
            .get(self.index())
            .copied()
            .unwrap_or_else(DebugName::anonymous)
    }

    /// Convert `EventKind` to u32.
    #[inline(always)]
    pub const fn index_u32(self) -> u32 {
        self.0
    }

    /// Convert `EventKind` to usize.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Hash for EventKind {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.0);
    }
}

impl Debug for EventKind {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for EventKind {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

// -----------------------------------------------------------------------------
// Kind table

struct KindTable {
    mapper: TypeIdMap<EventKind>,
    names: Vec<DebugName>,
}

// Entries are only ever appended, so a guard recovered from a poisoned lock
// still sees a consistent table.
static KINDS: RwLock<KindTable> = RwLock::new(KindTable {
    mapper: TypeIdMap::new(),
    names: Vec::new(),
});

#[inline]
fn read_table() -> RwLockReadGuard<'static, KindTable> {
    KINDS.read().unwrap_or_else(PoisonError::into_inner)
}

#[cold]
#[inline(never)]
fn register_internal<E: Event>(type_id: TypeId) -> EventKind {
    let mut table = KINDS.write().unwrap_or_else(PoisonError::into_inner);
    let KindTable { mapper, names } = &mut *table;

    // Another thread may have won the race between the read and write locks.
    *mapper.get_or_insert(type_id, || {
        let index = names.len();
        assert!(index < u32::MAX as usize, "too many event kinds");

        names.push(DebugName::type_name::<E>());
        EventKind::new(index as u32)
    })
}

// -----------------------------------------------------------------------------
// EventSet

/// A set of event types whose kinds can be allocated together.
///
/// Implemented for every [`Event`] and for tuples of up to 12 sets.
pub trait EventSet: 'static {
    /// Pushes the kinds of every type in the set, in declaration order.
    fn collect_kinds(kinds: &mut Vec<EventKind>);
}

impl<E: Event> EventSet for E {
    #[inline]
    fn collect_kinds(kinds: &mut Vec<EventKind>) {
        kinds.push(E::kind());
    }
}

impl EventSet for () {
    #[inline]
    fn collect_kinds(_kinds: &mut Vec<EventKind>) {}
}

macro_rules! impl_event_set_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: EventSet),+> EventSet for ($($name,)+) {
            #[inline]
            fn collect_kinds(kinds: &mut Vec<EventKind>) {
                $( <$name>::collect_kinds(kinds); )+
            }
        }
    };
}

macro_rules! impl_event_set_all {
    ($head:ident) => {
        impl_event_set_for_tuple!($head);
    };
    ($head:ident, $($tail:ident),+) => {
        impl_event_set_for_tuple!($head, $($tail),+);
        impl_event_set_all!($($tail),+);
    };
}

impl_event_set_all!(E0, E1, E2, E3, E4, E5, E6, E7, E8, E9, E10, E11);

/// Allocates the kinds of every event type in `S` and returns them in
/// declaration order.
///
/// Calling this once at startup for a closed set of event types makes the
/// numbering independent of which type happens to be published first.
///
/// # Examples
///
/// ```
/// use vc_event::{Event, register};
///
/// #[derive(Clone)]
/// struct Spawned;
/// #[derive(Clone)]
/// struct Despawned;
///
/// impl Event for Spawned {}
/// impl Event for Despawned {}
///
/// let kinds = register::<(Spawned, Despawned)>();
/// assert_eq!(kinds, [Spawned::kind(), Despawned::kind()]);
/// ```
pub fn register<S: EventSet>() -> Vec<EventKind> {
    let mut kinds = Vec::new();
    S::collect_kinds(&mut kinds);
    kinds
}

// -----------------------------------------------------------------------------
// Tests
