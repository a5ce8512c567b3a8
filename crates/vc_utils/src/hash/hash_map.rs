//! [`hashbrown`] map aliases with the hash states of this crate.

use super::NoOpHashState;

/// A [`hashbrown::HashMap`] for keys that hash to themselves,
/// such as dense integer identifiers.
///
/// # Examples
///
/// ```
/// use vc_utils::hash::NoOpHashMap;
///
/// let mut map = NoOpHashMap::<u32, &str>::default();
/// map.insert(3, "three");
/// assert_eq!(map.get(&3), Some(&"three"));
/// ```
pub type NoOpHashMap<K, V> = hashbrown::HashMap<K, V, NoOpHashState>;
