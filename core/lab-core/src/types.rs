//! Core types shared by the library and its front ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// History Types
// ═══════════════════════════════════════════════════════════════════════════════

/// Usage record for one regex pattern.
///
/// The pattern string is the record's identity. `usage_count` is never zero
/// and `last_used_at` never moves backwards; both only change through
/// [`PatternHistoryEntry::touch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternHistoryEntry {
    pattern: String,
    usage_count: u32,
    last_used_at: DateTime<Utc>,
}

impl PatternHistoryEntry {
    /// A first use of `pattern` at `now`.
    pub(crate) fn first_use(pattern: &str, now: DateTime<Utc>) -> Self {
        Self {
            pattern: pattern.to_string(),
            usage_count: 1,
            last_used_at: now,
        }
    }

    /// Builds an entry with explicit statistics.
    ///
    /// Pattern syntax is not checked here; the store validates on insert.
    pub fn with_usage(
        pattern: impl Into<String>,
        usage_count: u32,
        last_used_at: DateTime<Utc>,
    ) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return Err(LabError::InvalidArgument(
                "pattern cannot be empty".to_string(),
            ));
        }
        if usage_count == 0 {
            return Err(LabError::InvalidArgument(
                "usage count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            pattern,
            usage_count,
            last_used_at,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn usage_count(&self) -> u32 {
        self.usage_count
    }

    pub fn last_used_at(&self) -> DateTime<Utc> {
        self.last_used_at
    }

    /// Records one more use at `now`.
    ///
    /// A clock that stepped backwards leaves the timestamp where it was.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.usage_count = self.usage_count.saturating_add(1);
        if now > self.last_used_at {
            self.last_used_at = now;
        }
    }

    #[cfg(test)]
    pub(crate) fn set_last_used_for_test(&mut self, at: DateTime<Utc>) {
        self.last_used_at = at;
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Match Types
// ═══════════════════════════════════════════════════════════════════════════════

/// One match of a pattern, with byte offsets into the searched text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub pattern: String,
}

impl MatchResult {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' at [{}-{}] using pattern: {}",
            self.text, self.start, self.end, self.pattern
        )
    }
}
