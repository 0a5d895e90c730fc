//! In-memory pattern usage history.
//!
//! Entries are keyed by the exact pattern string (case-sensitive, no
//! normalization). The store only ever holds patterns that compiled at the
//! time they were recorded, and nothing is written to disk.
//!
//! # Ordering
//!
//! [`PatternHistoryStore::list_all`] has no defined order. Ranked queries sort
//! explicitly by `last_used_at` descending; entries sharing a timestamp are
//! ordered by pattern text so results are stable between calls.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use crate::error::{LabError, Result};
use crate::types::PatternHistoryEntry;
use crate::validator::PatternValidator;

fn by_recency(a: &&PatternHistoryEntry, b: &&PatternHistoryEntry) -> Ordering {
    b.last_used_at()
        .cmp(&a.last_used_at())
        .then_with(|| a.pattern().cmp(b.pattern()))
}

/// Pattern → usage record map.
///
/// Not internally synchronized: every mutation takes `&mut self`.
#[derive(Debug, Default)]
pub struct PatternHistoryStore {
    entries: HashMap<String, PatternHistoryEntry>,
    validator: PatternValidator,
}

impl PatternHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validator(validator: PatternValidator) -> Self {
        PatternHistoryStore {
            entries: HashMap::new(),
            validator,
        }
    }

    pub fn validator(&self) -> &PatternValidator {
        &self.validator
    }

    /// Records one use of `pattern`, validating it strictly first.
    ///
    /// The store is left untouched when validation fails.
    pub fn record_usage(&mut self, pattern: &str) -> Result<&PatternHistoryEntry> {
        self.validator.is_valid_strict(pattern)?;
        Ok(self.record_validated(pattern))
    }

    /// Lenient variant of [`record_usage`](Self::record_usage): invalid
    /// patterns yield `None` and record nothing.
    pub fn try_record_usage(&mut self, pattern: &str) -> Option<&PatternHistoryEntry> {
        if !self.validator.is_valid_lenient(pattern) {
            debug!(pattern, "Skipping history for invalid pattern");
            return None;
        }
        Some(self.record_validated(pattern))
    }

    /// Creates or bumps the entry for a pattern the caller already compiled.
    pub(crate) fn record_validated(&mut self, pattern: &str) -> &PatternHistoryEntry {
        let now = Utc::now();
        let entry = self
            .entries
            .entry(pattern.to_string())
            .and_modify(|e| e.touch(now))
            .or_insert_with(|| PatternHistoryEntry::first_use(pattern, now));
        debug!(
            pattern,
            usage_count = entry.usage_count(),
            "Recorded pattern usage"
        );
        entry
    }

    /// Registers a pre-built entry, replacing any record for the same pattern.
    pub fn add_entry(&mut self, entry: PatternHistoryEntry) -> Result<()> {
        self.validator.is_valid_strict(entry.pattern())?;
        debug!(
            pattern = entry.pattern(),
            usage_count = entry.usage_count(),
            "Added history entry"
        );
        self.entries.insert(entry.pattern().to_string(), entry);
        Ok(())
    }

    pub fn get(&self, pattern: &str) -> Option<&PatternHistoryEntry> {
        self.entries.get(pattern)
    }

    pub fn remove(&mut self, pattern: &str) -> Option<PatternHistoryEntry> {
        let removed = self.entries.remove(pattern);
        if removed.is_some() {
            debug!(pattern, "Removed history entry");
        }
        removed
    }

    pub fn list_all(&self) -> Vec<&PatternHistoryEntry> {
        self.entries.values().collect()
    }

    /// Empties the store, returning how many entries were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        debug!(removed, "Cleared pattern history");
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Up to `limit` entries, most recently used first.
    pub fn recent(&self, limit: usize) -> Result<Vec<&PatternHistoryEntry>> {
        if limit == 0 {
            return Err(LabError::InvalidArgument(
                "limit must be greater than 0".to_string(),
            ));
        }

        let mut entries = self.list_all();
        entries.sort_by(by_recency);
        entries.truncate(limit);
        Ok(entries)
    }

    /// Entries whose pattern contains `substring`, ignoring case, most recent first.
    pub fn search(&self, substring: &str) -> Result<Vec<&PatternHistoryEntry>> {
        if substring.trim().is_empty() {
            return Err(LabError::InvalidArgument(
                "search text cannot be empty".to_string(),
            ));
        }

        let needle = substring.to_lowercase();
        let mut entries: Vec<_> = self
            .entries
            .values()
            .filter(|e| e.pattern().to_lowercase().contains(&needle))
            .collect();
        entries.sort_by(by_recency);
        Ok(entries)
    }

    /// Every entry sharing the highest usage count.
    pub fn most_used(&self) -> Vec<&PatternHistoryEntry> {
        let Some(max) = self.entries.values().map(|e| e.usage_count()).max() else {
            return Vec::new();
        };

        let mut entries: Vec<_> = self
            .entries
            .values()
            .filter(|e| e.usage_count() == max)
            .collect();
        entries.sort_by(by_recency);
        entries
    }

    pub fn last_used(&self) -> Option<&PatternHistoryEntry> {
        self.entries.values().min_by(|a, b| by_recency(a, b))
    }

    #[cfg(test)]
    pub(crate) fn set_last_used_for_test(
        &mut self,
        pattern: &str,
        timestamp: chrono::DateTime<Utc>,
    ) {
        if let Some(entry) = self.entries.get_mut(pattern) {
            entry.set_last_used_for_test(timestamp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use std::thread;

    fn at(offset_secs: i64) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
            + Duration::seconds(offset_secs)
    }

    fn patterns(entries: &[&PatternHistoryEntry]) -> Vec<String> {
        entries.iter().map(|e| e.pattern().to_string()).collect()
    }

    #[test]
    fn test_empty_store_has_no_entries() {
        let store = PatternHistoryStore::new();
        assert!(store.is_empty());
        assert!(store.get("a").is_none());
        assert!(store.last_used().is_none());
        assert!(store.most_used().is_empty());
    }

    #[test]
    fn test_record_usage_creates_then_increments() {
        let mut store = PatternHistoryStore::new();
        let first = store.record_usage(r"\d+").unwrap().last_used_at();
        assert_eq!(store.get(r"\d+").unwrap().usage_count(), 1);

        thread::sleep(std::time::Duration::from_millis(5));
        let entry = store.record_usage(r"\d+").unwrap();
        assert_eq!(entry.usage_count(), 2);
        assert!(entry.last_used_at() >= first);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_record_usage_is_case_sensitive() {
        let mut store = PatternHistoryStore::new();
        store.record_usage("abc").unwrap();
        store.record_usage("ABC").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_record_usage_invalid_pattern_leaves_store_unchanged() {
        let mut store = PatternHistoryStore::new();
        store.record_usage("ok").unwrap();

        let err = store.record_usage("[a-z").unwrap_err();
        assert!(matches!(err, LabError::InvalidPattern { .. }));
        assert!(matches!(
            store.record_usage(""),
            Err(LabError::EmptyPattern)
        ));
        assert_eq!(store.len(), 1);
        assert!(store.get("[a-z").is_none());
    }

    #[test]
    fn test_try_record_usage_returns_none_for_invalid() {
        let mut store = PatternHistoryStore::new();
        assert!(store.try_record_usage("(").is_none());
        assert!(store.try_record_usage("").is_none());
        assert!(store.is_empty());

        let entry = store.try_record_usage("a|b").unwrap();
        assert_eq!(entry.usage_count(), 1);
    }

    #[test]
    fn test_add_entry_validates_and_replaces() {
        let mut store = PatternHistoryStore::new();
        store.record_usage("x").unwrap();

        let entry = PatternHistoryEntry::with_usage("x", 7, at(0)).unwrap();
        store.add_entry(entry).unwrap();
        assert_eq!(store.get("x").unwrap().usage_count(), 7);

        let bad = PatternHistoryEntry::with_usage("[", 1, at(0)).unwrap();
        assert!(store.add_entry(bad).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_returns_entry_or_none() {
        let mut store = PatternHistoryStore::new();
        store.record_usage("a").unwrap();
        let removed = store.remove("a").unwrap();
        assert_eq!(removed.pattern(), "a");
        assert!(store.remove("nonexistent").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_empties_store() {
        let mut store = PatternHistoryStore::new();
        store.record_usage("a").unwrap();
        store.record_usage("b").unwrap();
        assert_eq!(store.clear(), 2);
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn test_recent_sorts_by_timestamp_and_truncates() {
        let mut store = PatternHistoryStore::new();
        for p in ["a", "b", "c"] {
            store.record_usage(p).unwrap();
        }
        store.set_last_used_for_test("a", at(10));
        store.set_last_used_for_test("b", at(30));
        store.set_last_used_for_test("c", at(20));

        assert_eq!(patterns(&store.recent(2).unwrap()), vec!["b", "c"]);
        assert_eq!(patterns(&store.recent(10).unwrap()), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_recent_rejects_zero_limit() {
        let store = PatternHistoryStore::new();
        assert!(matches!(
            store.recent(0),
            Err(LabError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_recent_ties_fall_back_to_pattern_order() {
        let mut store = PatternHistoryStore::new();
        for p in ["b", "a", "c"] {
            store.record_usage(p).unwrap();
            store.set_last_used_for_test(p, at(0));
        }
        assert_eq!(patterns(&store.recent(3).unwrap()), vec!["a", "b", "c"]);
        assert_eq!(store.last_used().unwrap().pattern(), "a");
    }

    #[test]
    fn test_search_is_case_insensitive_and_ordered() {
        let mut store = PatternHistoryStore::new();
        store.record_usage(r"[A-Z]+\d").unwrap();
        store.record_usage(r"[a-z]+").unwrap();
        store.record_usage(r"\s+").unwrap();
        store.set_last_used_for_test(r"[A-Z]+\d", at(1));
        store.set_last_used_for_test(r"[a-z]+", at(2));

        let found = store.search("A-Z").unwrap();
        assert_eq!(patterns(&found), vec![r"[a-z]+", r"[A-Z]+\d"]);
        assert!(store.search("nomatch").unwrap().is_empty());
    }

    #[test]
    fn test_search_rejects_blank_substring() {
        let store = PatternHistoryStore::new();
        assert!(matches!(store.search(""), Err(LabError::InvalidArgument(_))));
        assert!(matches!(
            store.search("   "),
            Err(LabError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_most_used_returns_all_ties() {
        let mut store = PatternHistoryStore::new();
        store.record_usage("a").unwrap();
        store.record_usage("a").unwrap();
        store.record_usage("b").unwrap();
        assert_eq!(patterns(&store.most_used()), vec!["a"]);

        store.record_usage("b").unwrap();
        let mut tied = patterns(&store.most_used());
        tied.sort();
        assert_eq!(tied, vec!["a", "b"]);
    }

    #[test]
    fn test_last_used_picks_latest_timestamp() {
        let mut store = PatternHistoryStore::new();
        store.record_usage("old").unwrap();
        store.record_usage("new").unwrap();
        store.set_last_used_for_test("old", at(100));
        store.set_last_used_for_test("new", at(200));
        assert_eq!(store.last_used().unwrap().pattern(), "new");
    }
}
