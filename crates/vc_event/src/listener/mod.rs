//! Listener handles and the per-kind listener registry.

// -----------------------------------------------------------------------------
// Modules

mod ident;
mod listeners;

// -----------------------------------------------------------------------------
// Exports

pub use ident::{DispatcherId, DispatcherIdAllocator, ListenerId};
pub use listeners::{Listener, ListenerSnapshot, Listeners};
