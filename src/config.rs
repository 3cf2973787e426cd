use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{GraphWalkError, Result};

/// Playback configuration for the engine.
///
/// Controls the step cadence sessions use when the caller does not supply an
/// explicit tick interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// Milliseconds between graph traversal steps.
    pub graph_tick_ms: u64,
    /// Milliseconds between tree traversal steps.
    pub tree_tick_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: 1,
            graph_tick_ms: 800,
            tree_tick_ms: 1000,
        }
    }
}

impl EngineConfig {
    pub fn graph_tick(&self) -> Duration {
        Duration::from_millis(self.graph_tick_ms)
    }

    pub fn tree_tick(&self) -> Duration {
        Duration::from_millis(self.tree_tick_ms)
    }
}

/// Loads the configuration from `path`.
///
/// If the file does not exist, returns the default configuration.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| GraphWalkError::Config {
        message: format!("failed to read config file '{}': {}", path.display(), e),
    })?;

    let config: EngineConfig =
        serde_json::from_str(&contents).map_err(|e| GraphWalkError::Config {
            message: format!("failed to parse config file '{}': {}", path.display(), e),
        })?;

    Ok(config)
}

/// Saves the configuration to `path` using an atomic write.
///
/// Writes to a temporary file first and then renames it to the final
/// location, ensuring that a partial write never corrupts the configuration.
pub fn save_config(path: &Path, config: &EngineConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| GraphWalkError::Config {
            message: format!("failed to create config directory '{}': {}", dir.display(), e),
        })?;
    }

    let tmp_path = path.with_extension("tmp");

    let json = serde_json::to_string_pretty(config).map_err(|e| GraphWalkError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| GraphWalkError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, path).map_err(|e| GraphWalkError::Config {
        message: format!(
            "failed to rename temporary config file '{}' to '{}': {}",
            tmp_path.display(),
            path.display(),
            e
        ),
    })?;

    Ok(())
}
