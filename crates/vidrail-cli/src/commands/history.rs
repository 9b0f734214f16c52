use crate::output::{Output, OutputFormat};
use chrono::Utc;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use dialoguer::Confirm;
use serde_json::json;
use vidrail_config::PathManager;
use vidrail_core::{relative_age, FileStore, HistoryStore, HISTORY_LIMIT};
use vidrail_models::HistoryEntry;

pub async fn run_history(
    remove: Option<String>,
    clear: bool,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Could not prepare data directory: {}", e))?;

    let mut history = HistoryStore::new(FileStore::new(path_manager.data_dir()));

    if clear {
        let confirmed = yes
            || Confirm::new()
                .with_prompt("Clear all watch history?")
                .default(false)
                .interact()?;
        if !confirmed {
            output.info("Nothing cleared");
            return Ok(());
        }

        history.clear().map_err(|e| eyre!("{}", e))?;
        output.success("Watch history cleared");
        return Ok(());
    }

    if let Some(id) = remove {
        let before = history.load().len();
        let list = history.remove(&id).map_err(|e| eyre!("{}", e))?;
        if list.len() == before {
            output.warn(format!("No history entry with id '{}'", id));
        } else {
            output.success(format!(
                "Removed '{}' from watch history ({} entries left)",
                id,
                list.len()
            ));
        }
        return Ok(());
    }

    let entries = history.load();
    if entries.is_empty() {
        output.info("No watch history. Videos you watch will appear here.");
        return Ok(());
    }

    render_history(&entries, output);
    Ok(())
}

fn render_history(entries: &[HistoryEntry], output: &Output) {
    match output.format() {
        OutputFormat::Human => {
            let now = Utc::now();
            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Video").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Watched"),
                Cell::new("Id"),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

            for entry in entries {
                table.add_row(vec![
                    Cell::new(&entry.title),
                    Cell::new(relative_age(entry.timestamp, now)),
                    Cell::new(&entry.id),
                ]);
            }

            output.println(table.to_string());
            output.info(format!(
                "{} video(s) in history ({} kept at most)",
                entries.len(),
                HISTORY_LIMIT
            ));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "type": "history",
                "entries": entries,
            }));
        }
    }
}
