use crate::output::{Output, OutputFormat};
use chrono::Utc;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;
use vidrail_config::PathManager;
use vidrail_core::project;
use vidrail_models::DisplayVideo;

pub async fn run_browse(limit: Option<u32>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config = super::load_config(&path_manager)?;
    let client = super::catalog_client(&config)?;
    let limit = limit.unwrap_or(config.max_results);

    let spinner = super::fetch_spinner("Loading videos...");
    let fetched = client.most_popular(limit).await;
    spinner.finish_and_clear();

    let items = match fetched {
        Ok(items) => items,
        Err(e) => {
            output.error(format!("Failed to load videos: {}", e));
            output.info("Check your API key and network, then try again.");
            return Ok(());
        }
    };

    let videos = match project(&items, Utc::now()) {
        Ok(videos) => videos,
        Err(e) => {
            // Zero items is its own state, not a fetch failure
            output.error(e.to_string());
            return Ok(());
        }
    };

    render_gallery(&videos, output);
    Ok(())
}

fn render_gallery(videos: &[DisplayVideo], output: &Output) {
    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("#"),
                Cell::new("Video").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Channel"),
                Cell::new("Views"),
                Cell::new("Age"),
                Cell::new("Id"),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

            for (i, video) in videos.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(i + 1),
                    Cell::new(&video.title),
                    Cell::new(&video.channel_name),
                    Cell::new(format!("{} views", video.formatted_views)),
                    Cell::new(&video.relative_age),
                    Cell::new(&video.id),
                ]);
            }

            output.println(table.to_string());
            output.info("Watch one with: vidrail watch <ID>");
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "type": "gallery",
                "videos": videos,
            }));
        }
    }
}
