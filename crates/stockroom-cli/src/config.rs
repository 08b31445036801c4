use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use stockroom_core::contract::CONTENT_AUTHORITY;
use stockroom_core::storage::DATABASE_NAME;

#[derive(Debug, Serialize, Deserialize)]
pub struct StockroomConfig {
    pub store: StoreSection,
    #[serde(default)]
    pub provider: ProviderSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderSection {
    pub authority: String,
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            authority: CONTENT_AUTHORITY.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct LogSection {
    pub filter: Option<String>,
}

impl StockroomConfig {
    pub fn new(store_path: PathBuf, authority: Option<String>) -> Self {
        Self {
            store: StoreSection {
                path: store_path.to_string_lossy().to_string(),
            },
            provider: authority
                .map(|authority| ProviderSection { authority })
                .unwrap_or_default(),
            log: LogSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join(DATABASE_NAME))
}

pub fn read_config(path: &Path) -> anyhow::Result<StockroomConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &StockroomConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("stockroom"));
        }
    }
    Ok(home_dir()?.join(".config").join("stockroom"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("stockroom"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("stockroom"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
