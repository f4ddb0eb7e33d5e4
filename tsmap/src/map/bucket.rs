use std::mem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) key: i32,
    pub(crate) value: i32,
}

/// The chain of entries whose keys land on one bucket index.
///
/// Entries are kept in insertion order and keys are unique.
#[derive(Debug, Default)]
pub(crate) struct Bucket {
    entries: Vec<Entry>,
}

impl Bucket {
    pub(crate) fn find(&self, key: i32) -> Option<i32> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value)
    }

    /// Overwrites the value of an existing key in place, or appends a new
    /// entry at the tail. Returns the previous value for an existing key.
    pub(crate) fn upsert(&mut self, key: i32, value: i32) -> Option<i32> {
        for entry in self.entries.iter_mut() {
            if entry.key == key {
                return Some(mem::replace(&mut entry.value, value));
            }
        }
        self.entries.push(Entry { key, value });
        None
    }

    /// Splices the entry for `key` out of the chain. The remaining entries
    /// keep their relative order.
    pub(crate) fn remove(&mut self, key: i32) -> Option<i32> {
        let idx = self.entries.iter().position(|entry| entry.key == key)?;
        Some(self.entries.remove(idx).value)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(bucket: &Bucket) -> Vec<i32> {
        bucket.iter().map(|entry| entry.key).collect()
    }

    #[test]
    fn empty_bucket() {
        let mut bucket = Bucket::default();
        assert_eq!(bucket.len(), 0);
        assert_eq!(bucket.find(3), None);
        assert_eq!(bucket.remove(3), None);
    }

    #[test]
    fn upsert_appends_new_keys_at_tail() {
        let mut bucket = Bucket::default();
        assert_eq!(bucket.upsert(5, 50), None);
        assert_eq!(bucket.upsert(1, 10), None);
        assert_eq!(bucket.upsert(9, 90), None);
        assert_eq!(keys(&bucket), vec![5, 1, 9]);
        assert_eq!(bucket.len(), 3);
    }

    #[test]
    fn upsert_overwrites_in_place() {
        let mut bucket = Bucket::default();
        bucket.upsert(5, 50);
        bucket.upsert(1, 10);
        assert_eq!(bucket.upsert(5, 55), Some(50));
        assert_eq!(bucket.find(5), Some(55));
        assert_eq!(keys(&bucket), vec![5, 1]);
        assert_eq!(bucket.len(), 2);
    }

    #[test]
    fn remove_head_middle_and_tail() {
        let mut bucket = Bucket::default();
        for key in 0..5 {
            bucket.upsert(key, key * 10);
        }

        assert_eq!(bucket.remove(0), Some(0));
        assert_eq!(keys(&bucket), vec![1, 2, 3, 4]);

        assert_eq!(bucket.remove(2), Some(20));
        assert_eq!(keys(&bucket), vec![1, 3, 4]);

        assert_eq!(bucket.remove(4), Some(40));
        assert_eq!(keys(&bucket), vec![1, 3]);

        assert_eq!(bucket.remove(4), None);
        assert_eq!(bucket.len(), 2);
    }

    #[test]
    fn extreme_values_are_ordinary() {
        let mut bucket = Bucket::default();
        bucket.upsert(i32::MIN, i32::MAX);
        assert_eq!(bucket.find(i32::MIN), Some(i32::MAX));
        assert_eq!(bucket.remove(i32::MIN), Some(i32::MAX));
    }
}
