use std::path::PathBuf;

use stockroom_core::{SqliteStorage, StorageEngine};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_store_path, write_config, StockroomConfig};
use crate::errors::CliError;
use crate::ui::{print, receipt};

fn validate_authority(value: &str) -> anyhow::Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.contains('/') || trimmed.chars().any(char::is_whitespace) {
        return Err(CliError::invalid_input(format!(
            "Invalid authority: {:?} (expected a name like com.example.stockroom)",
            value
        ))
        .into());
    }
    Ok(trimmed.to_string())
}

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let authority = args
        .authority
        .as_deref()
        .map(validate_authority)
        .transpose()?;

    let target = match args.path.as_deref().or(ctx.cli().db.as_deref()) {
        Some(path) => PathBuf::from(path),
        None => default_store_path()?,
    };

    let storage = SqliteStorage::at_path(&target);
    storage.open()?;
    let version = storage.schema_version()?;
    tracing::info!(path = %target.display(), version, "inventory database ready");

    // An existing config is left alone; it may point at another database.
    let config_path = resolve_config_path()?;
    let config_status = if config_path.exists() {
        "unchanged".to_string()
    } else {
        write_config(&config_path, &StockroomConfig::new(target.clone(), authority))?;
        config_path.display().to_string()
    };

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, None);
        let path = target.display().to_string();
        let version = version.to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Initialized inventory",
                &[
                    ("Path", &path),
                    ("Config", &config_status),
                    ("Schema", &version),
                ],
            ),
        );
    }
    Ok(())
}
