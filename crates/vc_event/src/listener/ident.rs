use core::fmt::{Debug, Display};
use core::hash::Hash;
use core::num::NonZeroU64;
use core::sync::atomic::{AtomicU64, Ordering};

// -----------------------------------------------------------------------------
// DispatcherId

/// A unique identifier for one [`EventDispatcher`](crate::EventDispatcher)
/// instance.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DispatcherId(NonZeroU64);

impl DispatcherId {
    /// Creates a new `DispatcherId` with the given raw value.
    #[inline]
    pub const fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    /// Returns the raw value of this id.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl Hash for DispatcherId {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.get());
    }
}

impl Debug for DispatcherId {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for DispatcherId {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

// -----------------------------------------------------------------------------
// DispatcherIdAllocator

/// A thread-safe allocator for [`DispatcherId`]s, starting from `1`.
///
/// # Examples
///
/// ```
/// # use vc_event::listener::DispatcherIdAllocator;
/// static ALLOCATOR: DispatcherIdAllocator = DispatcherIdAllocator::new();
///
/// let a = ALLOCATOR.alloc();
/// let b = ALLOCATOR.alloc();
/// assert_ne!(a, b);
/// ```
///
/// # Panics
///
/// Panics if more than `u64::MAX - 1` ids are allocated.
#[derive(Debug, Default)]
pub struct DispatcherIdAllocator {
    next: AtomicU64,
}

impl DispatcherIdAllocator {
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Returns the number of ids handed out so far.
    pub fn count(&self) -> usize {
        self.next.load(Ordering::Relaxed).saturating_sub(1) as usize
    }

    pub fn alloc(&self) -> DispatcherId {
        let next = self.next.fetch_add(1, Ordering::Relaxed);
        assert!(next < u64::MAX, "too many dispatchers");
        match NonZeroU64::new(next) {
            Some(id) => DispatcherId(id),
            None => unreachable!("dispatcher ids start from 1"),
        }
    }
}

// -----------------------------------------------------------------------------
// ListenerId

/// The handle returned when a listener is registered; used to remove it.
///
/// Handles are numbered per dispatcher, increase monotonically and are
/// never reused. A handle also remembers which dispatcher issued it, so
/// presenting it to another dispatcher removes nothing.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId {
    owner: DispatcherId,
    index: u64,
}

impl ListenerId {
    #[inline]
    pub(crate) const fn new(owner: DispatcherId, index: u64) -> Self {
        Self { owner, index }
    }

    /// Returns the dispatcher that issued this handle.
    #[inline]
    pub const fn owner(self) -> DispatcherId {
        self.owner
    }

    /// Returns the per-dispatcher sequence number of this handle.
    #[inline]
    pub const fn index(self) -> u64 {
        self.index
    }
}

impl Debug for ListenerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}@{}", self.index, self.owner)
    }
}

impl Display for ListenerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}@{}", self.index, self.owner)
    }
}

// -----------------------------------------------------------------------------
// Tests
