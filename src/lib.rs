#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use vc_event as event;
pub use vc_utils as utils;

pub use vc_event::{Event, EventBox, EventDispatcher, EventKind, ListenerId, Subscriptions};
