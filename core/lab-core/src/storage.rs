//! Storage paths for Regex Lab.
//!
//! Pattern history is never written to disk. The only files Regex Lab owns are
//! its configuration and its logs, both under one root directory.

use std::path::{Path, PathBuf};

use crate::error::{LabError, Result};

/// Central configuration for Regex Lab file paths.
///
/// Production code uses `StoragePaths::from_home()` which points to `~/.regex-lab/`.
/// Tests use `StoragePaths::with_root(temp_dir)` for isolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    root: PathBuf,
}

impl StoragePaths {
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            LabError::InvalidArgument("home directory not found".to_string())
        })?;
        Ok(Self::with_root(home.join(".regex-lab")))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to config.json (user preferences).
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    /// Path to logs/ directory (rolling log files).
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}
