use thiserror::Error;

/// A durable write failed. The in-memory list handed back by the failed
/// operation is not authoritative; callers should re-`load()`.
#[derive(Debug, Error)]
#[error("failed to persist '{key}': {message}")]
pub struct PersistenceError {
    pub key: String,
    pub message: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectError {
    /// The upstream fetch succeeded but carried zero items. Distinct from a
    /// fetch failure so the presentation layer can render a different state.
    #[error("No videos found")]
    EmptyResult,
}
