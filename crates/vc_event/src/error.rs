use thiserror::Error;

use crate::{DebugName, EventKind};

/// Errors from typed access to an [`EventBox`](crate::EventBox).
///
/// Dispatching itself never fails; this only shows up when code asks an
/// envelope for a concrete event type it does not hold.
#[derive(Error, Debug, Clone, Copy)]
pub enum EventError {
    #[error("event kind mismatch: expected {expected} ({expected_name}), found {found} ({found_name})")]
    KindMismatch {
        expected: EventKind,
        expected_name: DebugName,
        found: EventKind,
        found_name: DebugName,
    },
}
