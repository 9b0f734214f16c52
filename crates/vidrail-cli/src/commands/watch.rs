use crate::output::{Output, OutputFormat};
use chrono::Utc;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;
use vidrail_config::PathManager;
use vidrail_core::{project, FileStore, HistoryStore};
use vidrail_models::{DisplayVideo, HistoryEntry};

pub async fn run_watch(id: &str, no_record: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config = super::load_config(&path_manager)?;
    let client = super::catalog_client(&config)?;

    // Record before loading the rail so a broken rail never loses the watch.
    if !no_record {
        let spinner = super::fetch_spinner("Fetching video details...");
        let fetched = client.video_by_id(id).await;
        spinner.finish_and_clear();

        match fetched {
            Ok(Some(item)) => {
                let entry = HistoryEntry {
                    id: item.id,
                    timestamp: Utc::now(),
                    title: item.title,
                    thumbnail_url: item.thumbnail_url,
                };
                let title = entry.title.clone();
                record_entry(&path_manager, entry, output);
                output.success(format!("Watching '{}' by {}", title, item.channel_name));
            }
            Ok(None) => {
                output.warn(format!(
                    "Video '{}' is not in the catalog; nothing recorded",
                    id
                ));
            }
            Err(e) => {
                output.warn(format!(
                    "Could not fetch video details ({}); nothing recorded",
                    e
                ));
            }
        }
    }

    // The rail is an independent fetch of the same popular chart.
    let spinner = super::fetch_spinner("Loading recommendations...");
    let fetched = client.most_popular(config.rail_size).await;
    spinner.finish_and_clear();

    match fetched {
        Ok(items) => match project(&items, Utc::now()) {
            Ok(videos) => render_rail(&videos, output),
            Err(e) => output.error(e.to_string()),
        },
        Err(e) => output.error(format!("Failed to load recommendations: {}", e)),
    }

    Ok(())
}

fn record_entry(path_manager: &PathManager, entry: HistoryEntry, output: &Output) {
    if let Err(e) = path_manager.ensure_directories() {
        output.warn(format!("Could not prepare data directory: {}", e));
        return;
    }

    let mut history = HistoryStore::new(FileStore::new(path_manager.data_dir()));
    if let Err(e) = history.record(entry) {
        // The watch page still works without its history side effect
        output.warn(format!("Could not save to watch history: {}", e));
    }
}

fn render_rail(videos: &[DisplayVideo], output: &Output) {
    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Up next").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Channel"),
                Cell::new("Views"),
                Cell::new("Age"),
                Cell::new("Id"),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

            for video in videos {
                table.add_row(vec![
                    Cell::new(&video.title),
                    Cell::new(&video.channel_name),
                    Cell::new(format!("{} views", video.formatted_views)),
                    Cell::new(&video.relative_age),
                    Cell::new(&video.id),
                ]);
            }

            output.println(table.to_string());
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "type": "rail",
                "videos": videos,
            }));
        }
    }
}
