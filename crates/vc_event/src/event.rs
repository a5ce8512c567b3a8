use crate::EventKind;

/// A discrete occurrence that can be published through an
/// [`EventDispatcher`](crate::EventDispatcher).
///
/// Events are plain values. Publishing clones them into the queue, so the
/// caller keeps its own copy and can drop or change it right away.
///
/// The provided methods should not be overridden: the kind of an event type
/// is always the one handed out by [`EventKind::of`].
///
/// # Examples
///
/// ```
/// use vc_event::{Event, EventKind};
///
/// #[derive(Clone)]
/// struct Collision {
///     a: u32,
///     b: u32,
/// }
///
/// impl Event for Collision {}
///
/// let event = Collision { a: 1, b: 2 };
/// assert_eq!(event.event_kind(), Collision::kind());
/// assert_eq!(Collision::kind(), EventKind::of::<Collision>());
/// ```
pub trait Event: Clone + 'static {
    /// Returns the kind shared by every value of this type.
    #[inline]
    fn kind() -> EventKind {
        EventKind::of::<Self>()
    }

    /// Returns the kind of this value.
    #[inline]
    fn event_kind(&self) -> EventKind {
        EventKind::of::<Self>()
    }
}
