//! Cache Store Module
//!
//! Main cache engine combining the key index with the recency list.

use tracing::{debug, info, trace};

use crate::cache::{
    CacheEntry, CacheStats, HashIndex, KeyIndex, RecencyList, MAX_PREALLOCATED_ENTRIES,
};
use crate::config::{Config, PutPolicy};
use crate::error::{CacheError, Result};

// == Response Cache ==
/// Fixed-capacity response cache with LRU eviction.
///
/// Every entry is reachable from both the index (by key) and the recency
/// list (by position). The list owns the entries; the index stores slots.
#[derive(Debug)]
pub struct ResponseCache<I: KeyIndex = HashIndex> {
    /// Key → slot lookup
    index: I,
    /// Entries ordered most to least recently used
    list: RecencyList,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Duplicate key handling
    policy: PutPolicy,
}

impl ResponseCache<HashIndex> {
    // == Constructor ==
    /// Creates an empty cache using the default hash index and put policy.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, at least 1
    /// * `index_size_hint` - Initial index size, 0 for the index default
    pub fn new(capacity: usize, index_size_hint: usize) -> Result<Self> {
        Self::with_policy(capacity, index_size_hint, PutPolicy::default())
    }

    /// Creates a cache from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_policy(config.max_entries, config.index_size, config.put_policy)
    }
}

impl<I: KeyIndex> ResponseCache<I> {
    /// Creates an empty cache with an explicit put policy and index type.
    pub fn with_policy(capacity: usize, index_size_hint: usize, policy: PutPolicy) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        info!(capacity, index_size_hint, %policy, "Response cache created");

        Ok(Self {
            index: I::with_size_hint(index_size_hint),
            // One spare slot for the entry that exists briefly before eviction
            list: RecencyList::with_capacity(
                capacity.saturating_add(1).min(MAX_PREALLOCATED_ENTRIES),
            ),
            stats: CacheStats::new(),
            capacity,
            policy,
        })
    }

    // == Put ==
    /// Stores a response as the most recently used entry.
    ///
    /// The content is copied into the cache. Least recently used entries are
    /// evicted until the cache is back within capacity. A key that is already
    /// present is handled according to the cache's [`PutPolicy`].
    ///
    /// # Arguments
    /// * `key` - The key to store under
    /// * `content_type` - Metadata describing the payload
    /// * `content` - The bytes to cache
    pub fn put(&mut self, key: &str, content_type: &str, content: &[u8]) -> Result<()> {
        if let Some(existing) = self.index.get(key) {
            match self.policy {
                PutPolicy::Strict => return Err(CacheError::DuplicateKey(key.to_string())),
                PutPolicy::Replace => {
                    self.index.delete(key);
                    self.list.remove(existing);
                    self.stats.record_replacement();
                    debug!(key, "Replaced cached entry");
                }
            }
        }

        let entry = CacheEntry::new(key, content_type, content);
        let slot = self.list.insert_at_head(entry);
        self.index.put(key, slot);

        while self.list.len() > self.capacity {
            let evicted = self.list.remove_tail().ok_or_else(|| {
                CacheError::Corrupted("recency list empty while over capacity".to_string())
            })?;
            self.index.delete(evicted.key());
            self.stats.record_eviction();
            debug!(key = evicted.key(), "Evicted least recently used entry");
        }

        self.stats.set_total_entries(self.list.len());
        Ok(())
    }

    // == Get ==
    /// Retrieves an entry by key and marks it as most recently used.
    ///
    /// Returns None on a miss, leaving the recency order untouched.
    pub fn get(&mut self, key: &str) -> Option<&CacheEntry> {
        let Some(slot) = self.index.get(key) else {
            self.stats.record_miss();
            trace!(key, "Cache miss");
            return None;
        };

        self.list.move_to_head(slot);
        match self.list.get(slot) {
            Some(entry) => {
                self.stats.record_hit();
                trace!(key, "Cache hit");
                Some(entry)
            }
            None => {
                self.stats.record_miss();
                trace!(key, "Cache miss on vacant slot");
                None
            }
        }
    }

    // == Peek ==
    /// Retrieves an entry without changing recency or statistics.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.list.get(self.index.get(key)?)
    }

    /// Checks if a key is cached without changing recency.
    pub fn contains(&self, key: &str) -> bool {
        self.index.get(key).is_some()
    }

    // == Destroy ==
    /// Tears the cache down, releasing every entry exactly once.
    ///
    /// The index is released first, then entries are released walking from
    /// the most to the least recently used. Returns the number of entries
    /// released.
    pub fn destroy(self) -> usize {
        let Self { index, mut list, .. } = self;
        drop(index);

        let mut released = 0;
        while let Some(slot) = list.head_slot() {
            if list.remove(slot).is_none() {
                break;
            }
            released += 1;
        }

        debug!(released, "Response cache destroyed");
        released
    }

    // == Accessors ==
    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.list.iter().map(|(_, entry)| entry.key())
    }

    /// Most recently used entry.
    pub fn head(&self) -> Option<&CacheEntry> {
        self.list.head()
    }

    /// Least recently used entry, the next eviction candidate.
    pub fn tail(&self) -> Option<&CacheEntry> {
        self.list.tail()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.list.len());
        stats
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> PutPolicy {
        self.policy
    }

    // == Verify ==
    /// Checks every structural invariant of the cache.
    ///
    /// Walks the list in both directions and cross-checks it against the
    /// index. Cost is linear in the number of entries.
    pub fn verify(&self) -> Result<()> {
        let len = self.list.len();

        if len > self.capacity {
            return Err(corrupted(format!(
                "size {} exceeds capacity {}",
                len, self.capacity
            )));
        }
        if self.index.len() != len {
            return Err(corrupted(format!(
                "index holds {} keys but list holds {} entries",
                self.index.len(),
                len
            )));
        }
        if (len == 0) != self.list.head_slot().is_none()
            || (len == 0) != self.list.tail_slot().is_none()
        {
            return Err(corrupted("head/tail presence does not match size".to_string()));
        }

        // A cycle would make the walk longer than `len`
        let forward: Vec<usize> = self.list.iter().take(len + 1).map(|(slot, _)| slot).collect();
        let mut backward: Vec<usize> = self
            .list
            .iter_rev()
            .take(len + 1)
            .map(|(slot, _)| slot)
            .collect();

        if forward.len() != len || backward.len() != len {
            return Err(corrupted(format!(
                "walked {} entries forward and {} backward, expected {}",
                forward.len(),
                backward.len(),
                len
            )));
        }
        if forward.last().copied() != self.list.tail_slot() {
            return Err(corrupted("forward walk does not end at tail".to_string()));
        }
        backward.reverse();
        if forward != backward {
            return Err(corrupted("prev links do not mirror next links".to_string()));
        }

        for (slot, entry) in self.list.iter() {
            if self.index.get(entry.key()) != Some(slot) {
                return Err(corrupted(format!(
                    "key '{}' is not indexed to its list slot",
                    entry.key()
                )));
            }
        }

        Ok(())
    }
}

fn corrupted(msg: String) -> CacheError {
    CacheError::Corrupted(msg)
}
