use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crossbeam::utils::CachePadded;
use log::{debug, trace};

use super::bucket::{Bucket, Entry};
use super::Map;
use crate::MapError;

pub const DEFAULT_CAPACITY: usize = 16;

type ProtectedBucket = CachePadded<Mutex<Bucket>>;

/// Maps a key to its bucket: the key's unsigned bit pattern modulo the
/// capacity. A capacity of zero maps every key to index 0.
///
/// Keys are not mixed before the reduction, so clustered keys cluster in
/// the same buckets.
pub fn key_index(key: i32, capacity: usize) -> usize {
    if capacity == 0 {
        return 0;
    }
    (key as u32 as usize) % capacity
}

/// A concurrent hashmap with a fixed number of buckets, each guarded by its
/// own mutex.
///
/// No operation holds more than one bucket lock at a time.
pub struct BucketMap {
    buckets: Box<[ProtectedBucket]>,
    size: CachePadded<AtomicUsize>,
}

impl Default for BucketMap {
    fn default() -> Self {
        Self::new()
    }
}

impl BucketMap {
    pub fn new() -> Self {
        let buckets = (0..DEFAULT_CAPACITY).map(|_| Self::empty_bucket()).collect();
        Self::build(buckets)
    }

    /// Creates a map with exactly `capacity` buckets.
    ///
    /// The bucket count never changes afterwards. A capacity of zero is
    /// rejected since there would be no bucket to place keys in.
    pub fn with_capacity(capacity: usize) -> Result<Self, MapError> {
        if capacity == 0 {
            return Err(MapError::ZeroCapacity);
        }

        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(capacity)
            .map_err(|_| MapError::AllocationFailed { capacity })?;
        buckets.extend((0..capacity).map(|_| Self::empty_bucket()));

        Ok(Self::build(buckets))
    }

    fn empty_bucket() -> ProtectedBucket {
        CachePadded::new(Mutex::new(Bucket::default()))
    }

    fn build(buckets: Vec<ProtectedBucket>) -> Self {
        debug!("initialized bucket map with {} buckets", buckets.len());
        BucketMap {
            buckets: buckets.into_boxed_slice(),
            size: CachePadded::new(AtomicUsize::new(0)),
        }
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Number of live entries across all buckets.
    ///
    /// Exact once concurrent mutation has quiesced.
    pub fn len(&self) -> usize {
        self.size.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bucket_index(&self, key: i32) -> usize {
        key_index(key, self.capacity())
    }

    fn lock_bucket(&self, index: usize) -> MutexGuard<'_, Bucket> {
        // Bucket mutations run no user code, so a poisoned bucket is still
        // consistent.
        self.buckets[index]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: i32) -> Option<i32> {
        let index = self.bucket_index(key);
        self.lock_bucket(index).find(key)
    }

    pub fn contains(&self, key: i32) -> bool {
        self.get(key).is_some()
    }

    /// Associates `value` with `key`.
    ///
    /// Returns the previous value if the key was already present, in which
    /// case it is overwritten in place and the size is unchanged.
    pub fn put(&self, key: i32, value: i32) -> Option<i32> {
        let index = self.bucket_index(key);
        let mut bucket = self.lock_bucket(index);
        let previous = bucket.upsert(key, value);
        if previous.is_none() {
            self.size.fetch_add(1, Ordering::AcqRel);
            trace!("inserted key {} into bucket {}", key, index);
        }
        previous
    }

    /// Removes `key`, returning the value it was mapped to.
    pub fn remove(&self, key: i32) -> Option<i32> {
        let index = self.bucket_index(key);
        let mut bucket = self.lock_bucket(index);
        let removed = bucket.remove(key);
        if removed.is_some() {
            self.size.fetch_sub(1, Ordering::AcqRel);
            trace!("removed key {} from bucket {}", key, index);
        }
        removed
    }

    /// Ratio of live entries to buckets.
    ///
    /// Reads the size counter without taking any bucket lock, so the result
    /// is approximate while other threads are mutating the map.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// Counts entries by scanning every bucket, one lock at a time.
    pub fn count_entries(&self) -> usize {
        (0..self.capacity())
            .map(|index| self.lock_bucket(index).len())
            .sum()
    }

    /// Writes one line per bucket: `[index] -> (key,value) -> (key,value)`.
    ///
    /// Each bucket is copied under its own lock, but buckets are visited one
    /// after another, so the output is not an atomic snapshot of the whole
    /// map when other threads are mutating it. Diagnostic use only.
    pub fn write_snapshot<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)
    }

    /// Prints the snapshot described in [`BucketMap::write_snapshot`] to
    /// stdout.
    pub fn print_snapshot(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for BucketMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in 0..self.capacity() {
            // copy out so no lock is held while formatting
            let entries: Vec<Entry> = self.lock_bucket(index).iter().copied().collect();

            write!(f, "[{}] -> ", index)?;
            for (i, entry) in entries.iter().enumerate() {
                if i > 0 {
                    f.write_str(" -> ")?;
                }
                write!(f, "({},{})", entry.key, entry.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for BucketMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketMap")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}

impl Map for BucketMap {
    type Key = i32;
    type Val = i32;

    fn get(&self, key: &i32) -> Option<i32> {
        BucketMap::get(self, *key)
    }

    fn contains(&self, key: &i32) -> bool {
        BucketMap::contains(self, *key)
    }

    fn put(&self, key: i32, value: i32) -> Option<i32> {
        BucketMap::put(self, key, value)
    }

    fn remove(&self, key: &i32) -> Option<i32> {
        BucketMap::remove(self, *key)
    }
}
