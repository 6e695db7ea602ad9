//! CLI mode
//!
//! One-shot commands that do not start the HTTP server.

use anyhow::{Context, Result};

use crate::cli::ConfigCommands;
use crate::config::{StaticConfig, get_config};
use crate::services::HistoryStore;

const DEFAULT_SAMPLE_PATH: &str = "config.example.toml";

/// Print the history file, one IP per line, most recent first
pub fn show_history() -> Result<()> {
    let config = get_config();
    let store = HistoryStore::from_config(&config.history);
    let history = store
        .get_history()
        .map_err(|e| anyhow::anyhow!("{}", e.format_colored()))?;

    if history.is_empty() {
        println!("No lookups recorded in {}", store.file_path().display());
        return Ok(());
    }

    for (i, ip) in history.iter().enumerate() {
        println!("{:>2}. {}", i + 1, ip);
    }
    Ok(())
}

pub fn run_config_command(action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Generate { output_path } => {
            let path = output_path.unwrap_or_else(|| DEFAULT_SAMPLE_PATH.to_string());
            StaticConfig::default()
                .save_to_file(&path)
                .map_err(|e| anyhow::anyhow!("{}", e))
                .with_context(|| format!("Failed to write sample config to {}", path))?;
            println!("Sample configuration written to {}", path);
            Ok(())
        }
    }
}
