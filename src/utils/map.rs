/*!
# Generalized Maps

Algorithms that need a map from integer keys can pick the implementation that fits the key
density:
- Sparse maps -> `HashMap`
- Dense indexed maps -> `Vec<Option<T>>`
*/

use std::{
    collections::HashMap,
    hash::{BuildHasher, Hash},
};

use num::ToPrimitive;

/// Minimalist trait for map-like collections.
pub trait Map<K, V> {
    /// Inserts an `(key, value)` pair into the map.
    /// If the key was present before, returns the previous value, otherwise returns `None`.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns a reference to the value corresponding to the given key, or `None` if the key is not present.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns the number of elements currently stored in the map.
    fn len(&self) -> usize;

    /// Returns `true` if the map is empty. Default implementation uses `len()`.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V, S> Map<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        HashMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

/// Keys that do not fit into `usize` map to an out-of-bounds slot
fn slot_of<I: ToPrimitive>(key: &I) -> usize {
    key.to_usize().unwrap_or(usize::MAX)
}

/// `Vec<Option<T>>` usable as `Map`.
/// ** Panics on insertion of a key outside of the allocated slots **
impl<I, T> Map<I, T> for Vec<Option<T>>
where
    I: ToPrimitive,
{
    fn insert(&mut self, key: I, value: T) -> Option<T> {
        self[slot_of(&key)].replace(value)
    }

    fn get(&self, key: &I) -> Option<&T> {
        self.as_slice().get(slot_of(key))?.as_ref()
    }

    fn len(&self) -> usize {
        self.iter().filter(|x| x.is_some()).count()
    }
}
