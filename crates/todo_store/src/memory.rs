//! In-memory storage backend for testing.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::{StorageBackend, StoreResult};

/// In-memory storage backend for testing purposes.
///
/// Clones share the same underlying slots, so two stores opened over clones
/// of one backend see each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBackend {
    /// Creates a new in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn contains(&self, key: &str) -> StoreResult<bool> {
        // A poisoned lock cannot tear a string slot; recover the guard.
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        Ok(slots.contains_key(key))
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let backend = MemoryBackend::new();
        assert!(!backend.contains("todos").unwrap());
        assert_eq!(backend.get("todos").unwrap(), None);

        backend.set("todos", "{}").unwrap();
        assert!(backend.contains("todos").unwrap());
        assert_eq!(backend.get("todos").unwrap(), Some("{}".to_string()));
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let backend = MemoryBackend::new();
        backend.set("todos", "a").unwrap();
        backend.set("todos", "b").unwrap();
        assert_eq!(backend.get("todos").unwrap(), Some("b".to_string()));
    }

    #[test]
    fn test_clones_share_slots() {
        let backend = MemoryBackend::new();
        let clone = backend.clone();
        backend.set("todos", "shared").unwrap();
        assert_eq!(clone.get("todos").unwrap(), Some("shared".to_string()));
    }
}
