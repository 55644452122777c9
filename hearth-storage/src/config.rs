//! Storage configuration, read from the `[storage]` table of a TOML file.

use crate::error::StorageResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where and how the registry is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backing file for the whole registry.
    pub file_path: PathBuf,
    /// Indent the JSON written on save.
    pub pretty: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from("file.json"),
            pretty: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageConfig,
}

impl StorageConfig {
    /// Parses TOML text; missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> StorageResult<Self> {
        let file: ConfigFile = toml::from_str(contents)?;
        Ok(file.storage)
    }

    /// Loads configuration from `path`, or the defaults if it does not exist.
    pub fn load_from(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No storage config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded storage config from {:?}", path);
        Ok(config)
    }
}
