use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

const APP_DIR_NAME: &str = "clipkeep";

/// Per-user locations of the settings file and the log directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_file: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    pub fn resolve() -> Result<Self> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("no config directory for this platform"))?;
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow!("no local data directory for this platform"))?;
        Ok(Self::from_base_dirs(&config_dir, &data_dir))
    }

    pub fn from_base_dirs(config_dir: &Path, data_dir: &Path) -> Self {
        Self {
            config_file: config_dir.join(APP_DIR_NAME).join("config.toml"),
            logs_dir: data_dir.join(APP_DIR_NAME).join("logs"),
        }
    }
}
