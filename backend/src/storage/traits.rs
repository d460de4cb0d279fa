//! # Storage Traits
//!
//! This module defines the storage abstraction that allows different
//! persistence backends to be used interchangeably in the domain layer.
//!
//! The whole application persists through three string-keyed blobs
//! (`items`, `items_backup`, `language`), so the abstraction is a plain
//! key-value store rather than per-entity repositories. Backends are assumed
//! to be possibly slow and possibly failing; callers own the retry policy.

use anyhow::Result;

/// Trait defining the interface for key-value blob storage.
///
/// Values are opaque strings (JSON-encoded by the callers). A missing key is
/// not an error; it reads back as `None`.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value. The write
    /// must be atomic: readers never observe a partially written value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` if present. Removing a missing key is a no-op.
    fn remove(&self, key: &str) -> Result<()>;
}
