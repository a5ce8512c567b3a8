#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Alloc support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod events;
mod player;

// -----------------------------------------------------------------------------
// Exports

pub use events::{EntityInteraction, GameState, GameStateChange, InteractionType};
pub use events::{PlayerAction, PlayerEvents, PlayerInput, register_player_events};
pub use player::{Player, PlayerState};
