use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One video as reported by the remote catalog, before any display
/// enrichment. Produced by the catalog client, consumed by the projector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub channel_name: String,
    pub thumbnail_url: String,
    pub published_at: DateTime<Utc>,
    /// Absent in the upstream payload for some videos; normalized to 0.
    pub view_count: u64,
}
