//! Settings file loading.
//!
//! The file is optional and every key has a default, so an empty or
//! missing file yields the stock engine configuration. Range checks happen
//! when the settings are turned into an [`EngineConfig`].

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use ck_core::{ConfigError, EngineConfig, MaxHistorySize};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub history: HistorySettings,
    pub monitor: MonitorSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub max_size: usize,
    pub display_limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_size: MaxHistorySize::DEFAULT,
            display_limit: EngineConfig::DEFAULT_DISPLAY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    pub poll_interval_ms: u64,
    pub settle_delay_ms: u64,
    pub capture_on_start: bool,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: EngineConfig::DEFAULT_POLL_INTERVAL.as_millis() as u64,
            settle_delay_ms: EngineConfig::DEFAULT_SETTLE_DELAY.as_millis() as u64,
            capture_on_start: true,
        }
    }
}

impl EngineSettings {
    pub fn to_engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let config = EngineConfig::default()
            .with_max_size(MaxHistorySize::new(self.history.max_size)?)
            .with_display_limit(self.history.display_limit)
            .with_poll_interval(Duration::from_millis(self.monitor.poll_interval_ms))
            .with_settle_delay(Duration::from_millis(self.monitor.settle_delay_ms))
            .with_capture_on_start(self.monitor.capture_on_start);
        config.validate()?;
        Ok(config)
    }
}

/// Load settings from `path`, falling back to defaults when the file does
/// not exist.
pub fn load_settings(path: &Path) -> anyhow::Result<EngineSettings> {
    if !path.exists() {
        info!(path = %path.display(), "No settings file, using defaults");
        return Ok(EngineSettings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    let settings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
    info!(path = %path.display(), "Loaded settings");
    Ok(settings)
}
