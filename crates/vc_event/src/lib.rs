#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Alloc support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod debug_name;
mod dispatcher;
mod envelope;
mod error;
mod event;
mod ident;
mod queue;
mod subscription;

pub mod listener;

// -----------------------------------------------------------------------------
// Exports

pub use debug_name::DebugName;
pub use dispatcher::EventDispatcher;
pub use envelope::EventBox;
pub use error::EventError;
pub use event::Event;
pub use ident::{EventKind, EventSet, register};
pub use listener::{DispatcherId, ListenerId};
pub use queue::EventQueue;
pub use subscription::Subscriptions;
