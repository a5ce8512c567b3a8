use core::any::TypeId;

use crate::hash::{NoOpHashMap, NoOpHashState};
use crate::hash::hashbrown::hash_map::Entry;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map keyed by [`TypeId`].
///
/// `TypeId`s are already hashes, so the map passes them through
/// [`NoOpHashState`] instead of hashing them again.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use vc_utils::TypeIdMap;
///
/// let mut map = TypeIdMap::new();
/// map.get_or_insert(TypeId::of::<u8>(), || "byte");
///
/// assert_eq!(map.get(&TypeId::of::<u8>()), Some(&"byte"));
/// assert_eq!(map.get(&TypeId::of::<u16>()), None);
/// ```
pub struct TypeIdMap<V>(NoOpHashMap<TypeId, V>);

impl<V> TypeIdMap<V> {
    /// Creates an empty `TypeIdMap`.
    #[inline]
    pub const fn new() -> Self {
        Self(NoOpHashMap::with_hasher(NoOpHashState))
    }

    /// Returns the value stored for `type_id`, inserting `f()` first if
    /// there is none.
    ///
    /// `f` only runs when the key is absent.
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }
}

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TypeIdMap;

    #[test]
    fn get_or_insert_runs_once() {
        let mut map = TypeIdMap::new();
        let mut calls = 0;

        *map.get_or_insert(TypeId::of::<i32>(), || {
            calls += 1;
            10
        }) += 1;
        *map.get_or_insert(TypeId::of::<i32>(), || {
            calls += 1;
            10
        }) += 1;

        assert_eq!(calls, 1);
        assert_eq!(map.get(&TypeId::of::<i32>()), Some(&12));
    }

    #[test]
    fn distinct_types() {
        let mut map = TypeIdMap::default();
        map.get_or_insert(TypeId::of::<u8>(), || 1);
        map.get_or_insert(TypeId::of::<i8>(), || 2);

        assert_eq!(map.get(&TypeId::of::<u8>()), Some(&1));
        assert_eq!(map.get(&TypeId::of::<i8>()), Some(&2));
        assert_eq!(map.get(&TypeId::of::<u16>()), None);
    }
}
