//! Storage backend trait definition.

use crate::StoreResult;

/// A synchronous string key-value storage slot.
///
/// The store treats an implementation as its sole durability layer: every
/// operation reads the whole record under one key, mutates it, and writes
/// it back in entirety.
pub trait StorageBackend {
    /// Returns whether a value exists under `key`.
    fn contains(&self, key: &str) -> StoreResult<bool>;

    /// Gets the value stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Sets the value stored under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}
