//! A fixed-capacity, thread-safe map from `i32` keys to `i32` values.
//!
//! Every bucket carries its own lock, so operations on keys that land in
//! different buckets run in parallel while operations on the same bucket
//! serialize.
//!
//! ```
//! use tsmap::BucketMap;
//!
//! let map = BucketMap::with_capacity(4).unwrap();
//! assert_eq!(map.put(1, 100), None);
//! assert_eq!(map.put(1, 101), Some(100));
//! assert_eq!(map.get(1), Some(101));
//! assert_eq!(map.remove(1), Some(101));
//! assert_eq!(map.get(1), None);
//! ```

mod error;
pub mod map;

pub use error::MapError;
pub use map::{key_index, BucketMap, Map, DEFAULT_CAPACITY};
