//! Error types for the response cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the response cache.
///
/// A cache miss is not an error; `get` reports it as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity below one at creation time
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Key already present under the strict put policy
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Configuration value could not be understood
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An internal structural invariant does not hold
    #[error("Cache corrupted: {0}")]
    Corrupted(String),
}

// == Result Type Alias ==
/// Convenience Result type for the response cache.
pub type Result<T> = std::result::Result<T, CacheError>;
