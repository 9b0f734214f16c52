use thiserror::Error;

/// Failure fetching the remote catalog. Never retried here; the caller
/// surfaces it and the user retries manually.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The API answered but reported an error in the body.
    #[error("catalog error: {0}")]
    Upstream(String),
}
