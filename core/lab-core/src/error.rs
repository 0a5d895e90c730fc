//! Error types for regex-lab-core operations.

use std::path::PathBuf;

/// All errors that can occur in regex-lab-core operations.
///
/// Pattern errors come in two flavours: [`LabError::EmptyPattern`] is a
/// precondition failure, [`LabError::InvalidPattern`] is a syntax (or size)
/// failure reported by the regex engine.
#[derive(Debug, thiserror::Error)]
pub enum LabError {
    // ─────────────────────────────────────────────────────────────────────
    // Pattern Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Regex pattern cannot be empty")]
    EmptyPattern,

    #[error("Invalid regex '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    // ─────────────────────────────────────────────────────────────────────
    // Argument Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────────────
    // I/O Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LabError {
    /// The offending pattern text, when this is a syntax error.
    pub fn pattern(&self) -> Option<&str> {
        match self {
            LabError::InvalidPattern { pattern, .. } => Some(pattern),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using LabError.
pub type Result<T> = std::result::Result<T, LabError>;
