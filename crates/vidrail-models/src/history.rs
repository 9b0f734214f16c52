use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One watched video in the persisted history blob.
///
/// Serialized with camelCase keys; the persisted form is a plain JSON array
/// of these with no schema version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    /// Time of the watch, refreshed every time the same video is recorded.
    pub timestamp: DateTime<Utc>,
    pub title: String,
    pub thumbnail_url: String,
}
