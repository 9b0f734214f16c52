pub mod config;
pub mod paths;

pub use config::{Config, API_KEY_ENV};
pub use paths::PathManager;
