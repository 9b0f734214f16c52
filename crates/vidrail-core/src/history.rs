use tracing::{debug, warn};
use vidrail_models::HistoryEntry;

use crate::error::PersistenceError;
use crate::storage::KeyValueStore;

/// Slot name in the backing store.
pub const HISTORY_KEY: &str = "watchHistory";

/// The list never grows past this; the oldest entries fall off.
pub const HISTORY_LIMIT: usize = 50;

/// Bounded, de-duplicated, most-recent-first record of watched videos.
///
/// Every mutation reads the persisted list, applies the change, and writes
/// the whole list back before returning it, so the durable form and the
/// returned form always match. The store is the only writer of its slot
/// within a process; there is no cross-call buffering.
pub struct HistoryStore<S> {
    store: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the persisted list. A missing or unreadable blob loads as empty;
    /// corruption is logged and silently healed on the next write.
    pub fn load(&self) -> Vec<HistoryEntry> {
        let Some(raw) = self.store.get(HISTORY_KEY) else {
            debug!("no watch history stored yet");
            return Vec::new();
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("watch history blob is unreadable ({}), starting empty", e);
                Vec::new()
            }
        }
    }

    /// Record a watch. Any prior entry for the same video moves to the head
    /// with a fresh timestamp rather than duplicating; the list is then
    /// truncated to [`HISTORY_LIMIT`].
    pub fn record(&mut self, entry: HistoryEntry) -> Result<Vec<HistoryEntry>, PersistenceError> {
        let mut entries = self.load();
        entries.retain(|e| e.id != entry.id);
        entries.insert(0, entry);
        entries.truncate(HISTORY_LIMIT);
        self.persist(&entries)?;
        Ok(entries)
    }

    /// Drop every entry with the given id. Unchanged list if absent.
    pub fn remove(&mut self, id: &str) -> Result<Vec<HistoryEntry>, PersistenceError> {
        let mut entries = self.load();
        entries.retain(|e| e.id != id);
        self.persist(&entries)?;
        Ok(entries)
    }

    pub fn clear(&mut self) -> Result<Vec<HistoryEntry>, PersistenceError> {
        let entries = Vec::new();
        self.persist(&entries)?;
        Ok(entries)
    }

    fn persist(&mut self, entries: &[HistoryEntry]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(entries).map_err(|e| PersistenceError {
            key: HISTORY_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(HISTORY_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::Utc;
    use std::collections::HashSet;

    fn create_entry(id: &str, title: &str) -> HistoryEntry {
        HistoryEntry {
            id: id.to_string(),
            timestamp: Utc::now(),
            title: title.to_string(),
            thumbnail_url: format!("https://img.example.com/{}/mq.jpg", id),
        }
    }

    fn store() -> HistoryStore<MemoryStore> {
        HistoryStore::new(MemoryStore::new())
    }

    #[test]
    fn test_load_empty_on_first_access() {
        assert!(store().load().is_empty());
    }

    #[test]
    fn test_record_prepends() {
        let mut history = store();
        history.record(create_entry("v1", "First")).unwrap();
        let list = history.record(create_entry("v2", "Second")).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "v2");
        assert_eq!(list[1].id, "v1");
    }

    #[test]
    fn test_rerecord_replaces_instead_of_duplicating() {
        let mut history = store();
        history.record(create_entry("v1", "Old title")).unwrap();
        let list = history.record(create_entry("v1", "New title")).unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "v1");
        assert_eq!(list[0].title, "New title");
    }

    #[test]
    fn test_rerecord_moves_to_head_from_anywhere() {
        let mut history = store();
        for id in ["v1", "v2", "v3"] {
            history.record(create_entry(id, id)).unwrap();
        }
        let list = history.record(create_entry("v1", "v1 again")).unwrap();

        let ids: Vec<&str> = list.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v3", "v2"]);
    }

    #[test]
    fn test_invariants_hold_after_every_record() {
        let mut history = store();
        for i in 0..120 {
            // Every third watch revisits an earlier video.
            let id = if i % 3 == 0 {
                format!("v{}", i / 2)
            } else {
                format!("v{}", i)
            };
            let list = history.record(create_entry(&id, "t")).unwrap();

            assert!(list.len() <= HISTORY_LIMIT);
            let unique: HashSet<&str> = list.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(unique.len(), list.len());
            assert_eq!(list[0].id, id);
        }
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut history = store();
        for i in 1..=55 {
            history.record(create_entry(&format!("v{}", i), "t")).unwrap();
        }

        let list = history.load();
        assert_eq!(list.len(), HISTORY_LIMIT);
        assert_eq!(list[0].id, "v55");
        assert_eq!(list[HISTORY_LIMIT - 1].id, "v6");
        assert!(!list.iter().any(|e| e.id == "v5"));
    }

    #[test]
    fn test_remove_filters_by_id() {
        let mut history = store();
        for id in ["v1", "v2", "v3"] {
            history.record(create_entry(id, id)).unwrap();
        }

        let list = history.remove("v2").unwrap();
        let ids: Vec<&str> = list.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["v3", "v1"]);
    }

    #[test]
    fn test_remove_missing_id_is_a_noop() {
        let mut history = store();
        history.record(create_entry("v1", "t")).unwrap();
        let before = history.load();

        let after = history.remove("absent").unwrap();
        assert_eq!(after, before);
        assert_eq!(history.load(), before);
    }

    #[test]
    fn test_clear_then_load_is_empty() {
        let mut history = store();
        history.record(create_entry("v1", "t")).unwrap();
        history.record(create_entry("v2", "t")).unwrap();

        assert!(history.clear().unwrap().is_empty());
        assert!(history.load().is_empty());
    }

    #[test]
    fn test_persisted_form_matches_returned_form() {
        let mut history = HistoryStore::new(MemoryStore::new());
        let list = history.record(create_entry("v1", "t")).unwrap();

        let raw = history.store.get(HISTORY_KEY).unwrap();
        let persisted: Vec<HistoryEntry> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, list);
    }

    #[test]
    fn test_corrupt_blob_self_heals_to_empty() {
        let mut memory = MemoryStore::new();
        memory.insert_raw(HISTORY_KEY, "{not json");
        let history = HistoryStore::new(memory);

        assert!(history.load().is_empty());
    }

    #[test]
    fn test_non_array_blob_treated_as_absent() {
        let mut memory = MemoryStore::new();
        memory.insert_raw(HISTORY_KEY, r#"{"id":"v1"}"#);
        let history = HistoryStore::new(memory);

        assert!(history.load().is_empty());
    }

    #[test]
    fn test_write_failure_surfaces() {
        let mut memory = MemoryStore::new();
        memory.set_fail_writes(true);
        let mut history = HistoryStore::new(memory);

        assert!(history.record(create_entry("v1", "t")).is_err());
        assert!(history.clear().is_err());
    }

    #[test]
    fn test_entry_serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&create_entry("v1", "t")).unwrap();
        assert!(json.contains("\"thumbnailUrl\""));
        assert!(json.contains("\"timestamp\""));
    }
}
