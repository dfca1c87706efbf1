//! Cache Entry Module
//!
//! Defines a single cached response: its key, content type and an owned copy
//! of the response body.

// == Cache Entry ==
/// One cached response.
///
/// The body is copied on construction and never mutated afterwards. Recency
/// links are kept by the list node wrapping the entry, not by the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    key: String,
    content_type: String,
    content: Box<[u8]>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry owning a private copy of `content`.
    ///
    /// # Arguments
    /// * `key` - The lookup key (e.g. a request path)
    /// * `content_type` - Metadata describing the payload
    /// * `content` - The bytes to copy into the entry
    pub fn new(key: impl Into<String>, content_type: impl Into<String>, content: &[u8]) -> Self {
        Self {
            key: key.into(),
            content_type: content_type.into(),
            content: content.into(),
        }
    }

    /// The key this entry is indexed under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The payload's content type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Read-only view of the cached bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Byte length of the cached content.
    pub fn content_length(&self) -> usize {
        self.content.len()
    }
}
