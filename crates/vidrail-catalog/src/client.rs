use reqwest::Client;
use vidrail_models::CatalogItem;

use crate::api;
use crate::error::FetchError;

/// The catalog-fetch collaborator: one shared HTTP client, one API key.
/// Each page view issues at most one fetch per call site; nothing is cached
/// or retried here.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    api_key: String,
    region: String,
}

impl CatalogClient {
    pub fn new(api_key: String, region: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            region,
        }
    }

    pub async fn most_popular(&self, max_results: u32) -> Result<Vec<CatalogItem>, FetchError> {
        api::fetch_most_popular(&self.client, &self.api_key, &self.region, max_results).await
    }

    pub async fn video_by_id(&self, id: &str) -> Result<Option<CatalogItem>, FetchError> {
        api::fetch_video(&self.client, &self.api_key, id).await
    }
}
