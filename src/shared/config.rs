use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::shared::errors::AppError;

/// Name of the config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "Config.toml";

/// Config file discovery
pub struct ConfigLoader;

impl ConfigLoader {
    /// The file to read: an explicit path, or `Config.toml` from the working
    /// directory when present. `None` means built-in defaults.
    pub fn locate(path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = path {
            return Some(path.to_path_buf());
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        local.exists().then(|| local.to_path_buf())
    }

    /// Load whatever [`Self::locate`] finds, falling back to defaults
    pub fn load(path: Option<&Path>) -> Result<Config, AppError> {
        match Self::locate(path) {
            Some(path) => Config::from_file(&path).map_err(|e| AppError::ConfigError(format!("{:#}", e))),
            None => Ok(Config::default()),
        }
    }
}
