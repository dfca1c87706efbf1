//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::CacheError;

// == Put Policy ==
/// How `put` treats a key that is already cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PutPolicy {
    /// Release the existing entry, then store the new one as most recently used
    #[default]
    Replace,
    /// Reject the put with `CacheError::DuplicateKey` and leave the cache unchanged
    Strict,
}

impl FromStr for PutPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(PutPolicy::Replace),
            "strict" => Ok(PutPolicy::Strict),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown put policy '{}', expected 'replace' or 'strict'",
                other
            ))),
        }
    }
}

impl fmt::Display for PutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PutPolicy::Replace => f.write_str("replace"),
            PutPolicy::Strict => f.write_str("strict"),
        }
    }
}

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Initial key index size, 0 for the index default
    pub index_size: usize,
    /// Duplicate key handling for `put`
    pub put_policy: PutPolicy,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unset or unparseable variables fall back to the defaults.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10)
    /// - `CACHE_INDEX_SIZE` - Initial index size, 0 = index default (default: 0)
    /// - `CACHE_PUT_POLICY` - `replace` or `strict` (default: replace)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_entries),
            index_size: env::var("CACHE_INDEX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.index_size),
            put_policy: env::var("CACHE_PUT_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.put_policy),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 10,
            index_size: 0,
            put_policy: PutPolicy::Replace,
        }
    }
}
