//! Global settings and pattern files.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_CALENDAR_LIMIT, DEFAULT_LIST_LIMIT, DEFAULT_PREVIEW_COUNT};
use crate::error::{RecurError, RecurResult};
use crate::pattern::RecurrenceConfig;

fn default_list_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

fn default_calendar_limit() -> usize {
    DEFAULT_CALENDAR_LIMIT
}

fn default_preview_count() -> usize {
    DEFAULT_PREVIEW_COUNT
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Global configuration at ~/.config/recur/config.toml
///
/// Every key may also be set through a `RECUR_` environment variable,
/// e.g. `RECUR_LIST_LIMIT=20`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RecurSettings {
    /// Occurrences shown by `recur dates` when no limit is given.
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// Occurrences enumerated to highlight a month grid.
    #[serde(default = "default_calendar_limit")]
    pub calendar_limit: usize,

    /// Upcoming dates listed under a pattern summary.
    #[serde(default = "default_preview_count")]
    pub preview_count: usize,

    /// Log filter used when neither `RUST_LOG` nor `-v` is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for RecurSettings {
    fn default() -> Self {
        RecurSettings {
            list_limit: default_list_limit(),
            calendar_limit: default_calendar_limit(),
            preview_count: default_preview_count(),
            log_level: default_log_level(),
        }
    }
}

impl RecurSettings {
    pub fn config_path() -> RecurResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RecurError::Config("Could not determine config directory".into()))?
            .join("recur");

        Ok(config_dir.join("config.toml"))
    }

    /// Load settings from the global config file, creating a commented default on first use.
    pub fn load() -> RecurResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load settings from `path` (which may be missing) plus `RECUR_*` overrides.
    pub fn load_from(path: &Path) -> RecurResult<Self> {
        let settings: RecurSettings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("RECUR").try_parsing(true))
            .build()
            .map_err(|e| RecurError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RecurError::Config(e.to_string()))?;

        debug!(path = %path.display(), ?settings, "Loaded settings");
        Ok(settings)
    }

    /// Write a config file with every option commented out.
    pub fn create_default_config(path: &Path) -> RecurResult<()> {
        let contents = format!(
            "\
# recur configuration

# Dates listed by `recur dates`:
# list_limit = {DEFAULT_LIST_LIMIT}

# Dates enumerated to highlight `recur calendar`:
# calendar_limit = {DEFAULT_CALENDAR_LIMIT}

# Upcoming dates shown by `recur summary`:
# preview_count = {DEFAULT_PREVIEW_COUNT}

# Log filter (overridden by RUST_LOG and -v):
# log_level = \"warn\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RecurError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RecurError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

/// Load a pattern saved as TOML.
pub fn load_pattern(path: &Path) -> RecurResult<RecurrenceConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| RecurError::Serialization(e.to_string()))
}

/// Save a pattern as TOML, creating parent directories as needed.
pub fn save_pattern(path: &Path, config: &RecurrenceConfig) -> RecurResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| RecurError::Serialization(e.to_string()))?;
    std::fs::write(path, content)?;
    debug!(path = %path.display(), "Saved pattern");
    Ok(())
}
