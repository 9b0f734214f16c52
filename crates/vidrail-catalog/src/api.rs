use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use vidrail_models::CatalogItem;

use crate::error::FetchError;

const CATALOG_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/videos";

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoResource>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[allow(dead_code)]
    code: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct VideoResource {
    id: String,
    snippet: Snippet,
    statistics: Option<Statistics>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(rename = "channelTitle")]
    channel_title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
    #[serde(rename = "publishedAt")]
    published_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Default)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    #[serde(rename = "default")]
    fallback: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct Statistics {
    /// The API reports counts as decimal strings; missing for some videos.
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
}

/// Fetch the public "most popular" chart for a region.
pub async fn fetch_most_popular(
    client: &Client,
    api_key: &str,
    region: &str,
    max_results: u32,
) -> Result<Vec<CatalogItem>, FetchError> {
    let max_results = max_results.to_string();
    let body = fetch_videos(
        client,
        &[
            ("part", "snippet,statistics"),
            ("chart", "mostPopular"),
            ("regionCode", region),
            ("maxResults", max_results.as_str()),
            ("key", api_key),
        ],
    )
    .await?;

    debug!("catalog returned {} videos for region {}", body.len(), region);
    Ok(body)
}

/// Fetch a single video's own metadata, or None when the id is unknown.
pub async fn fetch_video(
    client: &Client,
    api_key: &str,
    id: &str,
) -> Result<Option<CatalogItem>, FetchError> {
    let mut items = fetch_videos(
        client,
        &[
            ("part", "snippet,statistics"),
            ("id", id),
            ("key", api_key),
        ],
    )
    .await?;

    if items.is_empty() {
        debug!("catalog has no video with id {}", id);
        return Ok(None);
    }
    Ok(Some(items.remove(0)))
}

async fn fetch_videos(
    client: &Client,
    query: &[(&str, &str)],
) -> Result<Vec<CatalogItem>, FetchError> {
    let response = client
        .get(CATALOG_ENDPOINT)
        .query(query)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        // Failed requests still carry the API's JSON error envelope when the
        // key is bad or the quota is spent; prefer its message over raw text.
        if let Ok(envelope) = serde_json::from_str::<VideoListResponse>(&text) {
            if let Some(err) = envelope.error {
                return Err(FetchError::Upstream(err.message));
            }
        }
        return Err(FetchError::Upstream(format!("{} - {}", status, text)));
    }

    let envelope: VideoListResponse = response.json().await?;
    if let Some(err) = envelope.error {
        return Err(FetchError::Upstream(err.message));
    }

    Ok(envelope.items.into_iter().map(into_catalog_item).collect())
}

fn into_catalog_item(video: VideoResource) -> CatalogItem {
    let thumbnail_url = pick_thumbnail(&video.snippet.thumbnails)
        .unwrap_or_else(|| fallback_thumbnail(&video.id));
    let view_count = video
        .statistics
        .and_then(|s| s.view_count)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    CatalogItem {
        id: video.id,
        title: video.snippet.title,
        channel_name: video.snippet.channel_title,
        thumbnail_url,
        published_at: video.snippet.published_at,
        view_count,
    }
}

/// Largest thumbnail the catalog offers for a video.
fn pick_thumbnail(thumbnails: &Thumbnails) -> Option<String> {
    thumbnails
        .high
        .as_ref()
        .or(thumbnails.medium.as_ref())
        .or(thumbnails.fallback.as_ref())
        .map(|t| t.url.clone())
}

/// The catalog's well-known thumbnail URL scheme, for entries recorded
/// without a metadata fetch.
pub fn fallback_thumbnail(id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/mqdefault.jpg", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_resource(json: &str) -> VideoResource {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_into_catalog_item_maps_wire_fields() {
        let video = sample_resource(
            r#"{
                "id": "abc123",
                "snippet": {
                    "title": "A Video",
                    "channelTitle": "Some Channel",
                    "publishedAt": "2026-08-01T12:00:00Z",
                    "thumbnails": {
                        "default": {"url": "https://img/d.jpg"},
                        "medium": {"url": "https://img/m.jpg"},
                        "high": {"url": "https://img/h.jpg"}
                    }
                },
                "statistics": {"viewCount": "123456"}
            }"#,
        );

        let item = into_catalog_item(video);
        assert_eq!(item.id, "abc123");
        assert_eq!(item.channel_name, "Some Channel");
        assert_eq!(item.thumbnail_url, "https://img/h.jpg");
        assert_eq!(item.view_count, 123_456);
    }

    #[test]
    fn test_missing_view_count_is_zero() {
        let video = sample_resource(
            r#"{
                "id": "abc123",
                "snippet": {
                    "title": "A Video",
                    "channelTitle": "Some Channel",
                    "publishedAt": "2026-08-01T12:00:00Z",
                    "thumbnails": {"medium": {"url": "https://img/m.jpg"}}
                }
            }"#,
        );

        let item = into_catalog_item(video);
        assert_eq!(item.view_count, 0);
        assert_eq!(item.thumbnail_url, "https://img/m.jpg");
    }

    #[test]
    fn test_no_thumbnails_falls_back_to_url_scheme() {
        let video = sample_resource(
            r#"{
                "id": "abc123",
                "snippet": {
                    "title": "A Video",
                    "channelTitle": "Some Channel",
                    "publishedAt": "2026-08-01T12:00:00Z"
                }
            }"#,
        );

        assert_eq!(
            into_catalog_item(video).thumbnail_url,
            "https://img.youtube.com/vi/abc123/mqdefault.jpg"
        );
    }

    #[test]
    fn test_error_envelope_parses() {
        let envelope: VideoListResponse = serde_json::from_str(
            r#"{"error": {"code": 403, "message": "quota exceeded"}}"#,
        )
        .unwrap();

        assert!(envelope.items.is_empty());
        assert_eq!(envelope.error.unwrap().message, "quota exceeded");
    }
}
