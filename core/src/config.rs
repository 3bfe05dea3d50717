//! Application configuration, read from an optional JSON file.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_STORAGE_KEY: &str = "workouts";
pub const DEFAULT_MAP_ZOOM: u8 = 13;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key holding the serialized workout collection.
    pub storage_key: String,
    /// Directory used by the file-backed store.
    pub storage_dir: PathBuf,
    /// Zoom level for the initial map view and for focusing a workout.
    pub map_zoom: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: PathBuf::from("."),
            map_zoom: DEFAULT_MAP_ZOOM,
        }
    }
}

impl Config {
    /// Reads config from disk. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let mut de = serde_json::Deserializer::from_str(&contents);
        let config: Config =
            serde_path_to_error::deserialize(&mut de).map_err(|e| ConfigError::Parse {
                path: e.path().to_string(),
                message: e.inner().to_string(),
            })?;
        info!(
            "config loaded from {} (key={}, zoom={})",
            path.display(),
            config.storage_key,
            config.map_zoom
        );
        Ok(config)
    }

    /// Writes config to disk as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: ".".to_string(),
            message: e.to_string(),
        })?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}
