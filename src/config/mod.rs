//! Configuration module for the replay inspector
//!
//! Configuration is a single TOML file with three optional sections:
//!
//! ```toml
//! [logging]
//! filter = "warn,replay_inspector=debug"
//! directory = "/tmp/replay-inspector-logs"
//!
//! [classifier]
//! memory_categories = ["memory"]
//! error_categories = ["exception", "issue"]
//!
//! [output]
//! pretty = true
//! ```
//!
//! # Config Location
//!
//! The file is looked up in this order:
//! - An explicit path (the `--config` flag)
//! - The `REPLAY_INSPECTOR_CONFIG` environment variable
//! - The platform data directory under `dev.replay-inspector/config.toml`
//!
//! A missing file means defaults; a file that does not parse is an error.

pub mod settings;

pub use settings::*;

use crate::error::{InspectorError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.replay-inspector";

/// Config filename inside the app data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the config path
pub const CONFIG_ENV_VAR: &str = "REPLAY_INSPECTOR_CONFIG";

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        InspectorError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            InspectorError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Resolve which config file to use
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== Inspector Config ====================

/// Complete inspector configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InspectorConfig {
    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub classifier: ClassifierSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl InspectorConfig {
    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render the config as TOML text
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load config from a file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::debug!("Parsed config {:?}", path);
        Ok(config)
    }

    /// Load config from the resolved location
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match config_path(explicit) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config, returning defaults on any error
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        Self::load(explicit).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save config to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config {}", path.display()))
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(&dir.join(CONFIG_FILE))
    }
}
