//! LRU Response Cache - memoizes server responses in memory
//!
//! A fixed-capacity key/value cache combining O(1) key lookup with O(1)
//! recency tracking and least-recently-used eviction.
//!
//! ```
//! use lru_response_cache::ResponseCache;
//!
//! let mut cache = ResponseCache::new(2, 0).unwrap();
//! cache.put("/a", "text/html", b"<p>a</p>").unwrap();
//! cache.put("/b", "text/html", b"<p>b</p>").unwrap();
//! cache.get("/a");
//! cache.put("/c", "text/html", b"<p>c</p>").unwrap();
//!
//! assert!(cache.get("/b").is_none());
//! assert_eq!(cache.get("/a").unwrap().content(), b"<p>a</p>");
//! ```

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheEntry, CacheStats, ResponseCache};
pub use config::{Config, PutPolicy};
pub use error::{CacheError, Result};
