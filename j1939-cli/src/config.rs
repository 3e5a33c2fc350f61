//! Configuration loading and parsing

use anyhow::{Context, Result};
use j1939_codec::{load_catalog_file, CodecConfig, DtcCatalog, TelegramDescriptor};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// DTC catalog file (TOML/JSON); the built-in reference table if absent
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub codec: CodecConfig,
    #[serde(default)]
    pub telegrams: Vec<TelegramDescriptor>,
}

impl AppConfig {
    /// Load the configured catalog
    ///
    /// A relative catalog path is resolved against `base_dir`, the directory
    /// of the config file.
    pub fn load_catalog(&self, base_dir: &Path) -> Result<DtcCatalog> {
        match &self.catalog {
            Some(path) => {
                let path = base_dir.join(path);
                load_catalog_file(&path)
                    .with_context(|| format!("Failed to load catalog: {:?}", path))
            }
            None => Ok(DtcCatalog::reference()),
        }
    }

    /// Find a telegram descriptor by name
    pub fn telegram(&self, name: &str) -> Option<&TelegramDescriptor> {
        self.telegrams.iter().find(|t| t.name() == name)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    for telegram in &config.telegrams {
        telegram
            .validate()
            .with_context(|| format!("Invalid telegram descriptor '{}'", telegram.name()))?;
    }

    Ok(config)
}
