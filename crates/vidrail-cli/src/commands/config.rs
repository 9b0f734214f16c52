use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;
use vidrail_config::{Config, PathManager, API_KEY_ENV};

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output).await,
        crate::ConfigCommands::Set {
            api_key,
            region,
            max_results,
            rail_size,
        } => set_config(api_key, region, max_results, rail_size, output).await,
    }
}

async fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let key_display = match config.api_key() {
        Some(key) if full => key,
        Some(key) => mask_key(&key),
        None => format!("(not set - set {} or use 'config set')", API_KEY_ENV),
    };

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.add_row(vec![Cell::new("Config File"), Cell::new(config_file.display().to_string())]);
            table.add_row(vec![Cell::new("API Key"), Cell::new(key_display)]);
            table.add_row(vec![Cell::new("Region"), Cell::new(&config.region)]);
            table.add_row(vec![Cell::new("Gallery size"), Cell::new(config.max_results)]);
            table.add_row(vec![Cell::new("Rail size"), Cell::new(config.rail_size)]);
            output.println(table.to_string());
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "type": "config",
                "config_file": config_file.display().to_string(),
                "api_key": key_display,
                "region": config.region,
                "max_results": config.max_results,
                "rail_size": config.rail_size,
            }));
        }
    }

    Ok(())
}

async fn set_config(
    api_key: Option<String>,
    region: Option<String>,
    max_results: Option<u32>,
    rail_size: Option<u32>,
    output: &Output,
) -> Result<()> {
    if api_key.is_none() && region.is_none() && max_results.is_none() && rail_size.is_none() {
        output.warn("Nothing to set. Use --api-key, --region, --max-results, or --rail-size");
        return Ok(());
    }

    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    if api_key.is_some() {
        config.api_key = api_key;
    }
    if let Some(region) = region {
        if region.len() != 2 {
            return Err(eyre!("region must be a two-letter code, got '{}'", region));
        }
        config.region = region.to_uppercase();
    }
    if let Some(n) = max_results {
        if n == 0 || n > 50 {
            return Err(eyre!("max_results must be between 1 and 50"));
        }
        config.max_results = n;
    }
    if let Some(n) = rail_size {
        if n == 0 || n > 50 {
            return Err(eyre!("rail_size must be between 1 and 50"));
        }
        config.rail_size = n;
    }

    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    output.success(format!("Configuration saved to {}", config_file.display()));
    Ok(())
}

fn mask_key(key: &str) -> String {
    if key.len() <= 4 {
        "****".to_string()
    } else {
        format!("****{}", &key[key.len() - 4..])
    }
}
