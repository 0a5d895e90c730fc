//! Pattern validation on top of the `regex` crate's compile step.
//!
//! Two entry points with different failure policies:
//!
//! - [`PatternValidator::is_valid_strict`] returns a typed error describing why
//!   the pattern was rejected.
//! - [`PatternValidator::is_valid_lenient`] never errors and answers `false` for
//!   anything that cannot be compiled.

use crate::error::{LabError, Result};
use regex::{Regex, RegexBuilder};

/// Default upper bound on the compiled size of a pattern (10 MiB).
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Compiles patterns with a fixed size limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternValidator {
    size_limit: usize,
}

impl Default for PatternValidator {
    fn default() -> Self {
        Self {
            size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }
}

impl PatternValidator {
    pub fn with_size_limit(size_limit: usize) -> Self {
        Self { size_limit }
    }

    pub fn size_limit(&self) -> usize {
        self.size_limit
    }

    /// Compiles `pattern`, rejecting empty or whitespace-only input first.
    pub fn compile(&self, pattern: &str) -> Result<Regex> {
        if pattern.trim().is_empty() {
            return Err(LabError::EmptyPattern);
        }

        RegexBuilder::new(pattern)
            .size_limit(self.size_limit)
            .build()
            .map_err(|source| LabError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Returns `Ok(true)` when the pattern compiles.
    ///
    /// Fails with [`LabError::EmptyPattern`] for empty input and
    /// [`LabError::InvalidPattern`] for syntax errors.
    pub fn is_valid_strict(&self, pattern: &str) -> Result<bool> {
        self.compile(pattern).map(|_| true)
    }

    pub fn is_valid_lenient(&self, pattern: &str) -> bool {
        self.compile(pattern).is_ok()
    }
}
