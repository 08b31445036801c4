//! Application context for the Stockroom CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config file and inventory provider.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use stockroom_core::{InventoryProvider, SqliteStorage, UriResolver};

use crate::cli::Cli;
use crate::config::{read_config, StockroomConfig};
use crate::helpers::OutputFormat;
use crate::ui::UiContext;

use super::resolver::{resolve_config_path, resolve_db_path};

/// Application context that bundles CLI args with config and storage.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<StockroomConfig>>,
    provider: OnceCell<InventoryProvider>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
            provider: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, if one exists. Loaded once.
    pub fn config(&self) -> anyhow::Result<Option<&StockroomConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if !path.exists() {
                return Ok::<_, anyhow::Error>(None);
            }
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    /// Resolve the database path for commands that need an existing store.
    pub fn db_path(&self) -> anyhow::Result<PathBuf> {
        resolve_db_path(self.cli, self.config()?)
    }

    /// URI resolver for the configured authority.
    pub fn resolver(&self) -> anyhow::Result<UriResolver> {
        Ok(match self.config()? {
            Some(config) => UriResolver::new(config.provider.authority.clone()),
            None => UriResolver::default(),
        })
    }

    /// The inventory provider over the resolved database. Opened once.
    pub fn provider(&self) -> anyhow::Result<&InventoryProvider> {
        self.provider.get_or_try_init(|| {
            let path = self.db_path()?;
            tracing::debug!(path = %path.display(), "using database");
            Ok(InventoryProvider::new(
                SqliteStorage::at_path(path),
                self.resolver()?,
            ))
        })
    }

    /// Build a UI context for this invocation.
    pub fn ui_context(&self, json: bool, format: Option<OutputFormat>) -> UiContext {
        UiContext::from_env(json, format)
    }
}
