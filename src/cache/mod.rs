//! Cache Module
//!
//! Provides a fixed-capacity in-memory response cache with LRU eviction.

mod entry;
mod index;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use index::{HashIndex, KeyIndex};
pub use lru::RecencyList;
pub use stats::CacheStats;
pub use store::ResponseCache;

// == Public Constants ==
/// Index size used when a size hint of 0 is given
pub const DEFAULT_INDEX_SIZE: usize = 128;

/// Upper bound on storage reserved at construction; larger caches grow on demand
pub const MAX_PREALLOCATED_ENTRIES: usize = 1024;
