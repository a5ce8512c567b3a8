//! Provide hash containers, re-exports *hashbrown*.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

pub mod hash_map;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{NoOpHashState, NoOpHasher};

pub use hash_map::NoOpHashMap;

// -----------------------------------------------------------------------------
// Re-export crates

pub use hashbrown;
