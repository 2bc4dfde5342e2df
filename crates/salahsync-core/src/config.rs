//! Application configuration management.
//!
//! This module handles loading and saving the configuration, which covers
//! where the offline store lives and how connectivity is probed.
//!
//! Configuration is stored at `~/.config/salahsync/config.json`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::network::monitor::DEFAULT_ONLINE_DEBOUNCE;
use crate::network::probe::{DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_PROBE_URL};
use crate::refresh::DEFAULT_RECHECK_INTERVAL;

/// Application name used for config/data directory paths
pub const APP_NAME: &str = "salahsync";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory of the file-backed store. Defaults to the platform data dir.
    pub store_dir: Option<PathBuf>,
    pub probe_url: String,
    pub probe_timeout_secs: u64,
    pub online_debounce_ms: u64,
    pub prompt_recheck_minutes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: None,
            probe_url: DEFAULT_PROBE_URL.to_string(),
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            online_debounce_ms: DEFAULT_ONLINE_DEBOUNCE.as_millis() as u64,
            prompt_recheck_minutes: DEFAULT_RECHECK_INTERVAL.as_secs() / 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the offline store.
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn online_debounce(&self) -> Duration {
        Duration::from_millis(self.online_debounce_ms)
    }

    pub fn prompt_recheck_interval(&self) -> Duration {
        Duration::from_secs(self.prompt_recheck_minutes.max(1).saturating_mul(60))
    }
}
