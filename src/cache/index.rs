//! Key Index Module
//!
//! Lookup structure mapping keys to recency list slots.

use std::collections::HashMap;

use crate::cache::{DEFAULT_INDEX_SIZE, MAX_PREALLOCATED_ENTRIES};

// == Key Index ==
/// Key → slot mapping consumed by the cache.
///
/// The index only stores slot numbers; the entries themselves belong to the
/// recency list. Dropping an index releases its own storage and nothing else.
pub trait KeyIndex {
    /// Creates an empty index sized for `size_hint` keys.
    ///
    /// A hint of 0 selects [`DEFAULT_INDEX_SIZE`]. Implementations should not
    /// reserve more than [`MAX_PREALLOCATED_ENTRIES`] up front.
    fn with_size_hint(size_hint: usize) -> Self
    where
        Self: Sized;

    /// Inserts or overwrites `key`, returning the previous slot.
    fn put(&mut self, key: &str, slot: usize) -> Option<usize>;

    /// Looks up the slot stored under `key`.
    fn get(&self, key: &str) -> Option<usize>;

    /// Removes `key`, returning its slot. None if the key was absent.
    fn delete(&mut self, key: &str) -> Option<usize>;

    /// Number of indexed keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// == Hash Index ==
/// Default [`KeyIndex`] backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct HashIndex {
    slots: HashMap<String, usize>,
}

impl KeyIndex for HashIndex {
    fn with_size_hint(size_hint: usize) -> Self {
        let size = if size_hint == 0 {
            DEFAULT_INDEX_SIZE
        } else {
            size_hint.min(MAX_PREALLOCATED_ENTRIES)
        };
        Self {
            slots: HashMap::with_capacity(size),
        }
    }

    fn put(&mut self, key: &str, slot: usize) -> Option<usize> {
        self.slots.insert(key.to_string(), slot)
    }

    fn get(&self, key: &str) -> Option<usize> {
        self.slots.get(key).copied()
    }

    fn delete(&mut self, key: &str) -> Option<usize> {
        self.slots.remove(key)
    }

    fn len(&self) -> usize {
        self.slots.len()
    }
}
