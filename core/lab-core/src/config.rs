//! Configuration loading and saving.
//!
//! A missing, empty or unreadable config file yields defaults; configuration
//! problems never stop a session from starting.

use std::io::Write;

use chrono::format::{Item, StrftimeItems};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::{LabError, Result};
use crate::storage::StoragePaths;
use crate::validator::DEFAULT_REGEX_SIZE_LIMIT;

pub const DEFAULT_RECENT_LIMIT: usize = 10;
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// User preferences, stored as `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// How many entries the `recent` listing shows when no limit is given.
    pub recent_limit: usize,
    /// Upper bound on a compiled pattern's size, in bytes.
    pub regex_size_limit: usize,
    /// `chrono` format string for rendering last-used timestamps.
    pub timestamp_format: String,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            recent_limit: DEFAULT_RECENT_LIMIT,
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

/// True when chrono can render every specifier in `format`.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !format.trim().is_empty()
        && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

impl LabConfig {
    /// Replaces values that would make the lab unusable with defaults.
    fn sanitized(mut self) -> Self {
        if self.recent_limit == 0 {
            self.recent_limit = DEFAULT_RECENT_LIMIT;
        }
        if self.regex_size_limit == 0 {
            self.regex_size_limit = DEFAULT_REGEX_SIZE_LIMIT;
        }
        if !is_valid_timestamp_format(&self.timestamp_format) {
            warn!(
                format = %self.timestamp_format,
                "Invalid timestamp format in config; using default"
            );
            self.timestamp_format = DEFAULT_TIMESTAMP_FORMAT.to_string();
        }
        self
    }
}

/// Loads the configuration, returning defaults if the file doesn't exist.
pub fn load_config(paths: &StoragePaths) -> LabConfig {
    let path = paths.config_file();
    if !path.exists() {
        return LabConfig::default();
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) => {
            warn!(error = %err, "Failed to read config file; using defaults");
            return LabConfig::default();
        }
    };

    if content.trim().is_empty() {
        return LabConfig::default();
    }

    match serde_json::from_str::<LabConfig>(&content) {
        Ok(config) => config.sanitized(),
        Err(err) => {
            warn!(
                error = %err,
                path = %path.display(),
                "Config file is malformed; using defaults"
            );
            LabConfig::default()
        }
    }
}

/// Saves the configuration atomically (temp file + rename).
pub fn save_config(paths: &StoragePaths, config: &LabConfig) -> Result<()> {
    let path = paths.config_file();
    let dir = paths.root();
    fs::create_dir_all(dir).map_err(|e| LabError::Io {
        context: format!("creating {}", dir.display()),
        source: e,
    })?;

    let content = serde_json::to_string_pretty(config).map_err(|e| LabError::Json {
        context: "serializing config".to_string(),
        source: e,
    })?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| LabError::Io {
        context: format!("creating temp file in {}", dir.display()),
        source: e,
    })?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| LabError::Io {
            context: format!("writing temp file for {}", path.display()),
            source: e,
        })?;
    tmp.persist(&path).map_err(|e| LabError::Io {
        context: format!("persisting temp file to {}", path.display()),
        source: e.error,
    })?;

    Ok(())
}
