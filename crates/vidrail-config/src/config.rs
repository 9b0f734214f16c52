use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment override for the catalog API key; takes precedence over the
/// value in config.toml.
pub const API_KEY_ENV: &str = "VIDRAIL_API_KEY";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
    /// Videos fetched for the gallery page.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Videos fetched for the recommendation rail on the watch page.
    #[serde(default = "default_rail_size")]
    pub rail_size: u32,
}

fn default_region() -> String {
    "US".to_string()
}

fn default_max_results() -> u32 {
    24
}

fn default_rail_size() -> u32 {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            region: default_region(),
            max_results: default_max_results(),
            rail_size: default_rail_size(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, or fall back to defaults when it does not exist
    /// yet. A present-but-broken file is still an error.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Effective API key: environment first, then the config file.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.api_key.clone().filter(|v| !v.is_empty()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key().is_none() {
            return Err(anyhow::anyhow!(
                "No API key configured. Set {} or run 'vidrail config set --api-key <KEY>'",
                API_KEY_ENV
            ));
        }
        if self.region.len() != 2 {
            return Err(anyhow::anyhow!(
                "region must be a two-letter code, got '{}'",
                self.region
            ));
        }
        if self.max_results == 0 || self.max_results > 50 {
            return Err(anyhow::anyhow!("max_results must be between 1 and 50"));
        }
        if self.rail_size == 0 || self.rail_size > 50 {
            return Err(anyhow::anyhow!("rail_size must be between 1 and 50"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            api_key: Some("test_key".to_string()),
            region: "GB".to_string(),
            max_results: 12,
            rail_size: 8,
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("test_key"));
        assert_eq!(loaded.region, "GB");
        assert_eq!(loaded.max_results, 12);
        assert_eq!(loaded.rail_size, 8);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: Config = toml::from_str("api_key = \"k\"").unwrap();
        assert_eq!(config.region, "US");
        assert_eq!(config.max_results, 24);
        assert_eq!(config.rail_size, 20);
    }

    #[test]
    fn test_load_or_default_when_absent() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load_or_default(&path).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config {
            api_key: Some("k".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        config.region = "USA".to_string();
        assert!(config.validate().is_err());

        config.region = "US".to_string();
        config.max_results = 0;
        assert!(config.validate().is_err());
    }
}
