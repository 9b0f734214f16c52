use std::io::IsTerminal;
use std::time::Duration;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use vidrail_catalog::CatalogClient;
use vidrail_config::{Config, PathManager};

pub mod browse;
pub mod config;
pub mod history;
pub mod watch;

pub(crate) fn load_config(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    Config::load_or_default(&config_file).map_err(|e| {
        eyre!(
            "Failed to load config from {}: {}",
            config_file.display(),
            e
        )
    })
}

pub(crate) fn catalog_client(config: &Config) -> Result<CatalogClient> {
    config.validate().map_err(|e| eyre!("{}", e))?;
    let api_key = config
        .api_key()
        .ok_or_else(|| eyre!("No API key configured"))?;
    Ok(CatalogClient::new(api_key, config.region.clone()))
}

/// Spinner for the in-flight fetch; hidden when stderr is not a terminal so
/// piped output stays clean.
pub(crate) fn fetch_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if !std::io::stderr().is_terminal() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
