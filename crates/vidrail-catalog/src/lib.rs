pub mod api;
pub mod client;
pub mod error;

pub use api::fallback_thumbnail;
pub use client::CatalogClient;
pub use error::FetchError;
