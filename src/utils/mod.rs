/*!
# Utilities

Helper traits used by the generators:
- [`Map`] abstracts over sparse (`HashMap`) and dense (`Vec<Option<T>>`) maps,
- [`FromCapacity`] creates such a map with the right amount of reserved space.

You probably do not need to interact with this module directly.
*/

use std::{collections::HashMap, hash::RandomState};

use fxhash::{FxBuildHasher, FxHashMap};

pub mod map;

pub use map::Map;

/// Helper trait for datastructures that can be initialized with capacity.
/// Can be interpreted as reserved space or guaranteed used space.
pub trait FromCapacity: Sized {
    /// Create a new instance with a given capacity
    fn from_capacity(capacity: usize) -> Self {
        Self::from_total_used_capacity(capacity, capacity)
    }

    /// Creates a new instance from the total capacity (ie. the number of possible keys) and the
    /// capacity that will actually be used.
    fn from_total_used_capacity(total: usize, used: usize) -> Self;
}

impl<T> FromCapacity for Vec<Option<T>> {
    fn from_total_used_capacity(total: usize, _used: usize) -> Self {
        // A dense map needs a slot for every possible key
        std::iter::repeat_with(|| None).take(total).collect()
    }
}

impl<K, V> FromCapacity for HashMap<K, V, RandomState> {
    fn from_total_used_capacity(_total: usize, used: usize) -> Self {
        Self::with_capacity(used)
    }
}

impl<K, V> FromCapacity for FxHashMap<K, V> {
    fn from_total_used_capacity(_total: usize, used: usize) -> Self {
        Self::with_capacity_and_hasher(used, FxBuildHasher::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_map_has_slot_per_key() {
        let map: Vec<Option<u64>> = FromCapacity::from_total_used_capacity(10, 2);
        assert_eq!(map.len(), 10);
        assert!(map.iter().all(|x| x.is_none()));

        let map: FxHashMap<u64, u64> = FromCapacity::from_capacity(16);
        assert!(map.capacity() >= 16);
    }
}
