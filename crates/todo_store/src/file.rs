//! File-backed storage backend.

use std::{
    fs,
    io::ErrorKind,
    path::PathBuf,
};

use crate::{StorageBackend, StoreError, StoreResult};

/// Storage backend keeping one file per key under a root directory.
///
/// Keys must be plain names: empty keys and keys containing path separators
/// are rejected so a collection name cannot escape the root.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Creates a backend rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            return Err(StoreError::backend(format!("invalid storage key: {key:?}")));
        }
        Ok(self.root.join(key))
    }
}

impl StorageBackend for FileBackend {
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.path_for(key)?.try_exists()?)
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        fs::write(self.path_for(key)?, value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();

        assert!(!backend.contains("todos").unwrap());
        backend.set("todos", r#"{"todos":[]}"#).unwrap();
        assert!(backend.contains("todos").unwrap());
        assert_eq!(
            backend.get("todos").unwrap(),
            Some(r#"{"todos":[]}"#.to_string())
        );
    }

    #[test]
    fn test_missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();
        assert_eq!(backend.get("absent").unwrap(), None);
    }

    #[test]
    fn test_store_round_trips_across_instances() {
        use serde_json::json;

        use crate::Store;

        let dir = tempfile::tempdir().unwrap();

        let fields = json!({"title": "persisted", "completed": false})
            .as_object()
            .unwrap()
            .clone();
        let created = {
            let store = Store::open("todos", FileBackend::new(dir.path()).unwrap()).unwrap();
            store.save(fields).unwrap()
        };

        let store = Store::open("todos", FileBackend::new(dir.path()).unwrap()).unwrap();
        assert_eq!(store.find_all().unwrap(), vec![created]);
    }

    #[test]
    fn test_rejects_path_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();

        for key in ["", ".", "..", "a/b", "a\\b"] {
            assert!(matches!(
                backend.set(key, "x"),
                Err(StoreError::Backend(_))
            ));
        }
    }
}
