//! Configuration file parsing for .diagsnap.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name looked up in the project root or its ancestors.
pub const CONFIG_FILE: &str = ".diagsnap.toml";

/// Main configuration structure for .diagsnap.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagsnapConfig {
    #[serde(default)]
    pub exclude: ExcludeConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeConfig {
    /// Glob patterns tested against both the project-relative path and the
    /// bare file name. Default empty: nothing is ever excluded.
    #[serde(default)]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce window in milliseconds for coalescing feed notifications.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Feed file path, resolved against the project root unless absolute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed: Option<PathBuf>,
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for WatchConfig {
    fn default() -> Self {
        WatchConfig {
            debounce_ms: default_debounce_ms(),
            feed: None,
        }
    }
}

impl DiagsnapConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: DiagsnapConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Find and load .diagsnap.toml from the given directory or its ancestors.
    ///
    /// Callers re-run this before every aggregation cycle so live config
    /// edits take effect on the next cycle; nothing is cached.
    pub fn find_and_load(start_dir: &Path) -> Result<Self> {
        let mut current = start_dir;

        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Self::from_file(&config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        // No config found, use defaults
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
