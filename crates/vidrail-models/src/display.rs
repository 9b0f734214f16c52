use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog item enriched with the derived fields the gallery renders.
/// Immutable once projected; identity is `id` alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayVideo {
    pub id: String,
    pub title: String,
    pub channel_name: String,
    pub thumbnail_url: String,
    pub published_at: DateTime<Utc>,
    pub view_count: u64,
    pub avatar_url: String,
    pub formatted_views: String,
    pub relative_age: String,
}
