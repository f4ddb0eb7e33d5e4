//! This module contains the concurrent map implementation.

mod bucket;
mod bucket_map;

pub use bucket_map::{key_index, BucketMap, DEFAULT_CAPACITY};

/// Common functionalities for concurrent maps.
pub trait Map {
    /// Key type for a map implementation.
    type Key;
    /// Value type for a map implementation.
    type Val;

    /// Get a copy of the value associated with a key, if it exists.
    fn get(&self, key: &Self::Key) -> Option<Self::Val>;

    /// Check whether the map contains a value mapped to the given key.
    fn contains(&self, key: &Self::Key) -> bool {
        self.get(key).is_some()
    }

    /// Emplaces a key-value pair into the map.
    ///
    /// If there were a key-value pair associated with this provided key,
    /// its value is overwritten and the previous value returned.
    fn put(&self, key: Self::Key, value: Self::Val) -> Option<Self::Val>;

    /// Attempts to remove a key-value pair based on the provided key, returning
    /// the removed value if one was found.
    fn remove(&self, key: &Self::Key) -> Option<Self::Val>;
}
