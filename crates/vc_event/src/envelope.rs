use alloc::boxed::Box;
use core::any::Any;
use core::fmt::Debug;

use crate::{DebugName, Event, EventError, EventKind};

// -----------------------------------------------------------------------------
// EventBox

/// An owned, type-erased event together with its [`EventKind`].
///
/// This is what the queue stores. The payload belongs to the box alone:
/// building one from a borrowed event clones it, so later changes to the
/// caller's value are never seen through the box.
///
/// Listeners read the payload through [`downcast_ref`](Self::downcast_ref)
/// or [`get`](Self::get), which check the concrete type before handing out a
/// reference.
///
/// # Examples
///
/// ```
/// use vc_event::{Event, EventBox};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Score(u32);
/// impl Event for Score {}
///
/// let mut score = Score(10);
/// let boxed = EventBox::new(&score);
/// score.0 = 99;
///
/// assert_eq!(boxed.kind(), Score::kind());
/// assert_eq!(boxed.get::<Score>().unwrap(), &Score(10));
/// ```
pub struct EventBox {
    kind: EventKind,
    name: DebugName,
    payload: Box<dyn Any>,
    cloner: fn(&EventBox) -> EventBox,
}

impl EventBox {
    /// Boxes a copy of `event`.
    #[inline]
    pub fn new<E: Event>(event: &E) -> Self {
        Self::from_event(event.clone())
    }

    /// Boxes `event` without cloning it.
    pub fn from_event<E: Event>(event: E) -> Self {
        Self {
            kind: E::kind(),
            name: DebugName::type_name::<E>(),
            payload: Box::new(event),
            cloner: clone_boxed::<E>,
        }
    }

    /// Returns the kind of the boxed event.
    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Returns the readable name of the boxed event type.
    #[inline]
    pub fn name(&self) -> DebugName {
        self.name
    }

    /// Returns `true` if the box holds an `E`.
    #[inline]
    pub fn is<E: Event>(&self) -> bool {
        self.payload.is::<E>()
    }

    /// Returns the payload if it is an `E`.
    #[inline]
    pub fn downcast_ref<E: Event>(&self) -> Option<&E> {
        self.payload.downcast_ref::<E>()
    }

    /// Returns the payload if it is an `E`, or an error naming both kinds.
    pub fn get<E: Event>(&self) -> Result<&E, EventError> {
        self.downcast_ref::<E>().ok_or_else(|| EventError::KindMismatch {
            expected: E::kind(),
            expected_name: DebugName::type_name::<E>(),
            found: self.kind,
            found_name: self.name,
        })
    }

    /// Takes the payload out of the box if it is an `E`, otherwise gives the
    /// box back unchanged.
    pub fn into_inner<E: Event>(self) -> Result<E, Self> {
        let Self {
            kind,
            name,
            payload,
            cloner,
        } = self;

        match payload.downcast::<E>() {
            Ok(event) => Ok(*event),
            Err(payload) => Err(Self {
                kind,
                name,
                payload,
                cloner,
            }),
        }
    }
}

fn clone_boxed<E: Event>(this: &EventBox) -> EventBox {
    match this.downcast_ref::<E>() {
        Some(event) => EventBox::new(event),
        None => unreachable!("EventBox cloner does not match its payload"),
    }
}

impl Clone for EventBox {
    /// Deep-copies the payload through the event's own [`Clone`].
    #[inline]
    fn clone(&self) -> Self {
        (self.cloner)(self)
    }
}

impl Debug for EventBox {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBox")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests
