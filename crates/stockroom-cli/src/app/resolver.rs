//! Path resolution for config and database files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, StockroomConfig};
use crate::errors::CliError;

/// Resolve the config file path, checking STOCKROOM_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("STOCKROOM_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the database path from CLI args or config.
///
/// The database must already exist; only `init` creates one.
pub fn resolve_db_path(cli: &Cli, config: Option<&StockroomConfig>) -> anyhow::Result<PathBuf> {
    let path = match (cli.db.as_deref(), config) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(config)) => PathBuf::from(&config.store.path),
        (None, None) => {
            let config_path = resolve_config_path()?;
            return Err(CliError::not_found(
                missing_config_message(&config_path),
                "Hint: Run `stockroom init` or pass --db <PATH>.",
            )
            .into());
        }
    };

    if !path.exists() {
        return Err(CliError::not_found(
            missing_db_message(&path),
            "Hint: Run `stockroom init` to create it.",
        )
        .into());
    }
    Ok(path)
}

/// Error message when the database file is missing.
pub fn missing_db_message(path: &Path) -> String {
    format!("No inventory database found at {}", path.display())
}

/// Error message when config file is missing.
pub fn missing_config_message(config_path: &Path) -> String {
    format!(
        "No inventory configured (config not found at {})",
        config_path.display()
    )
}
