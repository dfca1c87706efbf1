//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a straightforward model of LRU
//! ordering and to assert the structural invariants after every operation.

use proptest::prelude::*;
use std::collections::VecDeque;

use crate::cache::ResponseCache;
use crate::config::PutPolicy;
use crate::error::CacheError;

// == Strategies ==
/// Generates request-path-like keys from a small alphabet so that hits,
/// duplicates and evictions all happen often.
fn key_strategy() -> impl Strategy<Value = String> {
    "/[a-f]{1,2}".prop_map(|s| s)
}

fn content_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

fn content_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("text/html".to_string()),
        Just("application/json".to_string()),
        Just("image/png".to_string()),
    ]
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, content: Vec<u8> },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), content_strategy())
            .prop_map(|(key, content)| CacheOp::Put { key, content }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

// == Model ==
/// Keys ordered most recently used first.
#[derive(Debug, Default)]
struct LruModel {
    order: VecDeque<String>,
    capacity: usize,
}

impl LruModel {
    fn new(capacity: usize) -> Self {
        Self {
            order: VecDeque::new(),
            capacity,
        }
    }

    fn touch(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.order.push_front(key.to_string());
    }

    /// Returns the keys evicted by this put.
    fn put(&mut self, key: &str) -> Vec<String> {
        self.touch(key);
        let mut evicted = Vec::new();
        while self.order.len() > self.capacity {
            if let Some(k) = self.order.pop_back() {
                evicted.push(k);
            }
        }
        evicted
    }

    fn get(&mut self, key: &str) -> bool {
        if self.order.iter().any(|k| k == key) {
            self.touch(key);
            true
        } else {
            false
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every operation leaves the cache in the same order as the model, within
    // capacity and with all structural invariants intact.
    #[test]
    fn prop_matches_lru_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let mut cache = ResponseCache::new(capacity, 0).unwrap();
        let mut model = LruModel::new(capacity);

        for op in ops {
            match op {
                CacheOp::Put { key, content } => {
                    let tail_before = cache.tail().map(|e| e.key().to_string());
                    let evicted = model.put(&key);
                    cache.put(&key, "text/html", &content).unwrap();

                    // Whatever was evicted was the least recently used entry
                    if let Some(first) = evicted.first() {
                        prop_assert_eq!(Some(first), tail_before.as_ref());
                        prop_assert!(!cache.contains(first));
                    }
                    prop_assert_eq!(cache.head().map(|e| e.key()), Some(key.as_str()));
                }
                CacheOp::Get { key } => {
                    let hit = model.get(&key);
                    prop_assert_eq!(cache.get(&key).is_some(), hit);
                    if hit {
                        prop_assert_eq!(cache.head().map(|e| e.key()), Some(key.as_str()));
                    }
                }
            }

            prop_assert!(cache.len() <= capacity);
            prop_assert_eq!(cache.keys().collect::<Vec<_>>(), Vec::from(model.order.clone()));
            prop_assert_eq!(cache.verify(), Ok(()));
        }
    }

    // Storing a response and reading it back returns identical metadata and bytes.
    #[test]
    fn prop_roundtrip_storage(
        key in key_strategy(),
        content_type in content_type_strategy(),
        content in content_strategy()
    ) {
        let mut cache = ResponseCache::new(4, 0).unwrap();

        cache.put(&key, &content_type, &content).unwrap();
        let entry = cache.get(&key).unwrap();

        prop_assert_eq!(entry.key(), key.as_str());
        prop_assert_eq!(entry.content_type(), content_type.as_str());
        prop_assert_eq!(entry.content(), content.as_slice());
        prop_assert_eq!(entry.content_length(), content.len());
    }

    // A miss changes neither the size nor the ends of the recency list.
    #[test]
    fn prop_miss_has_no_side_effects(
        keys in prop::collection::vec(key_strategy(), 0..10),
        probe in "/[g-z]{3}"
    ) {
        let mut cache = ResponseCache::new(4, 0).unwrap();
        for key in &keys {
            cache.put(key, "text/plain", key.as_bytes()).unwrap();
        }

        let len = cache.len();
        let head = cache.head().map(|e| e.key().to_string());
        let tail = cache.tail().map(|e| e.key().to_string());

        prop_assert!(cache.get(&probe).is_none());

        prop_assert_eq!(cache.len(), len);
        prop_assert_eq!(cache.head().map(|e| e.key().to_string()), head);
        prop_assert_eq!(cache.tail().map(|e| e.key().to_string()), tail);
    }

    // Under the strict policy a duplicate put fails and changes nothing.
    #[test]
    fn prop_strict_duplicate_is_rejected(
        keys in prop::collection::vec(key_strategy(), 1..10),
        pick in any::<prop::sample::Index>()
    ) {
        let mut cache: ResponseCache =
            ResponseCache::with_policy(16, 0, PutPolicy::Strict).unwrap();
        for key in &keys {
            let _ = cache.put(key, "text/plain", b"original");
        }

        let order: Vec<String> = cache.keys().map(str::to_string).collect();
        let dup = pick.get(&order).clone();

        let result = cache.put(&dup, "text/plain", b"replacement");
        prop_assert_eq!(result, Err(CacheError::DuplicateKey(dup.clone())));
        prop_assert_eq!(cache.keys().map(str::to_string).collect::<Vec<_>>(), order);
        prop_assert_eq!(cache.peek(&dup).map(|e| e.content()), Some(&b"original"[..]));
        prop_assert_eq!(cache.verify(), Ok(()));
    }

    // Destroy releases exactly the live entries.
    #[test]
    fn prop_destroy_releases_live_entries(
        capacity in 1usize..8,
        keys in prop::collection::vec(key_strategy(), 0..30)
    ) {
        let mut cache = ResponseCache::new(capacity, 0).unwrap();
        for key in &keys {
            cache.put(key, "text/plain", key.as_bytes()).unwrap();
        }

        let live = cache.len();
        prop_assert_eq!(cache.destroy(), live);
    }
}
