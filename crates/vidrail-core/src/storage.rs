use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::PersistenceError;

/// The durable key-value slot the history store writes through to.
///
/// Injected rather than reached for ambiently so tests (and embedders) can
/// substitute an in-memory implementation. Reads fail soft: an unreadable
/// slot is reported as absent, matching the self-healing policy of the
/// history blob. Only writes surface errors.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// One file per key under a data directory, `<dir>/<key>.json`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.slot_path(key);
        if !path.exists() {
            debug!("slot miss: {} (file does not exist)", key);
            return None;
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("failed to read slot file for {}: {}", key, e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.slot_path(key);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PersistenceError {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        }

        std::fs::write(&path, value).map_err(|e| PersistenceError {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        debug!("slot saved: {} ({} bytes)", key, value.len());
        Ok(())
    }
}

/// HashMap-backed store for tests and embedders without a filesystem.
/// Writes can be made to fail to exercise persistence error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Seed a slot directly, bypassing the failure switch.
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.slots.insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError {
                key: key.to_string(),
                message: "write refused (quota exceeded)".to_string(),
            });
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());

        assert_eq!(store.get("watchHistory"), None);

        store.set("watchHistory", "[]").unwrap();
        assert_eq!(store.get("watchHistory").as_deref(), Some("[]"));

        store.set("watchHistory", r#"[{"id":"a"}]"#).unwrap();
        assert_eq!(
            store.get("watchHistory").as_deref(),
            Some(r#"[{"id":"a"}]"#)
        );
    }

    #[test]
    fn test_file_store_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data").join("slots");
        let mut store = FileStore::new(&nested);

        store.set("watchHistory", "[]").unwrap();
        assert!(nested.join("watchHistory.json").exists());
    }

    #[test]
    fn test_memory_store_failure_mode() {
        let mut store = MemoryStore::new();
        store.set("k", "v").unwrap();

        store.set_fail_writes(true);
        let err = store.set("k", "v2").unwrap_err();
        assert_eq!(err.key, "k");

        // The failed write must not have clobbered the slot.
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }
}
