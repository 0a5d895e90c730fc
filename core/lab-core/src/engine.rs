//! RegexLab - the entry point for Regex Lab front ends.
//!
//! One `RegexLab` owns one matcher and one history store, so every pattern run
//! through it accumulates into the same history. It is:
//! - **Synchronous**: every call runs to completion
//! - **Single-owner**: mutations take `&mut self`; wrap in a `Mutex` to share
//! - **Observable**: subscribers hear about every successful history change
//!
//! ## Example Usage
//!
//! ```rust
//! use regex_lab_core::RegexLab;
//!
//! let mut lab = RegexLab::new();
//! let found = lab.record_and_match(r"\d+", "abc123def456");
//! assert_eq!(found, vec!["123", "456"]);
//! assert_eq!(lab.recent_history(5).unwrap()[0].usage_count(), 1);
//! ```

use crate::config::LabConfig;
use crate::error::Result;
use crate::history::{HistoryEvent, HistoryObserver, PatternHistoryStore};
use crate::matcher::PatternMatcher;
use crate::types::{MatchResult, PatternHistoryEntry};
use crate::validator::PatternValidator;

fn owned(entries: Vec<&PatternHistoryEntry>) -> Vec<PatternHistoryEntry> {
    entries.into_iter().cloned().collect()
}

/// Facade over the matcher and the history store.
pub struct RegexLab {
    matcher: PatternMatcher,
    store: PatternHistoryStore,
    observers: Vec<Box<dyn HistoryObserver>>,
}

impl Default for RegexLab {
    fn default() -> Self {
        Self::with_validator(PatternValidator::default())
    }
}

impl RegexLab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a lab whose patterns are compiled with the configured size limit.
    pub fn with_config(config: &LabConfig) -> Self {
        Self::with_validator(PatternValidator::with_size_limit(config.regex_size_limit))
    }

    pub fn with_validator(validator: PatternValidator) -> Self {
        Self {
            matcher: PatternMatcher::new(validator),
            store: PatternHistoryStore::with_validator(validator),
            observers: Vec::new(),
        }
    }

    /// Read access to the history for queries the facade does not wrap.
    pub fn history(&self) -> &PatternHistoryStore {
        &self.store
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    pub fn subscribe(&mut self, observer: Box<dyn HistoryObserver>) {
        self.observers.push(observer);
    }

    fn notify(&self, event: HistoryEvent) {
        for observer in &self.observers {
            observer.on_history_event(&event);
        }
    }

    fn notify_recorded(&self, pattern: &str) {
        if let Some(entry) = self.store.get(pattern) {
            self.notify(HistoryEvent::Recorded(entry.clone()));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Matching API (fail-soft)
    // ─────────────────────────────────────────────────────────────────────────────

    /// Records `pattern` and returns every match in `input`.
    ///
    /// An invalid pattern yields an empty list and records nothing.
    pub fn record_and_match(&mut self, pattern: &str, input: &str) -> Vec<String> {
        let before = self.usage_of(pattern);
        let found = self
            .matcher
            .find_all_and_record(&mut self.store, pattern, input);
        self.notify_if_recorded(pattern, before);
        found
    }

    /// Positional variant of [`record_and_match`](Self::record_and_match).
    pub fn record_and_locate(&mut self, pattern: &str, input: &str) -> Vec<MatchResult> {
        let before = self.usage_of(pattern);
        let found = self
            .matcher
            .find_matches_and_record(&mut self.store, pattern, input);
        self.notify_if_recorded(pattern, before);
        found
    }

    /// Records `pattern` and replaces every match; `None` for an invalid pattern.
    pub fn record_and_replace(
        &mut self,
        pattern: &str,
        input: &str,
        replacement: &str,
    ) -> Option<String> {
        let replaced = self
            .matcher
            .find_and_replace(&mut self.store, pattern, input, replacement);
        if replaced.is_some() {
            self.notify_recorded(pattern);
        }
        replaced
    }

    fn usage_of(&self, pattern: &str) -> Option<u32> {
        self.store.get(pattern).map(|e| e.usage_count())
    }

    fn notify_if_recorded(&self, pattern: &str, before: Option<u32>) {
        if self.usage_of(pattern) != before {
            self.notify_recorded(pattern);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // History API (strict)
    // ─────────────────────────────────────────────────────────────────────────────

    /// Records one use of `pattern` without matching anything.
    pub fn record_usage(&mut self, pattern: &str) -> Result<PatternHistoryEntry> {
        let entry = self.store.record_usage(pattern)?.clone();
        self.notify(HistoryEvent::Recorded(entry.clone()));
        Ok(entry)
    }

    /// Registers a pre-built entry, replacing any existing record for its pattern.
    pub fn add_history(&mut self, entry: PatternHistoryEntry) -> Result<()> {
        self.store.add_entry(entry.clone())?;
        self.notify(HistoryEvent::Recorded(entry));
        Ok(())
    }

    pub fn recent_history(&self, limit: usize) -> Result<Vec<PatternHistoryEntry>> {
        self.store.recent(limit).map(owned)
    }

    pub fn search_history(&self, substring: &str) -> Result<Vec<PatternHistoryEntry>> {
        self.store.search(substring).map(owned)
    }

    pub fn most_used(&self) -> Vec<PatternHistoryEntry> {
        owned(self.store.most_used())
    }

    pub fn last_used(&self) -> Option<PatternHistoryEntry> {
        self.store.last_used().cloned()
    }

    pub fn remove_history(&mut self, pattern: &str) -> Option<PatternHistoryEntry> {
        let removed = self.store.remove(pattern)?;
        self.notify(HistoryEvent::Removed(removed.clone()));
        Some(removed)
    }

    pub fn clear_history(&mut self) {
        let removed = self.store.clear();
        self.notify(HistoryEvent::Cleared { removed });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabError;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_lab() -> (RegexLab, Rc<RefCell<Vec<HistoryEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut lab = RegexLab::new();
        lab.subscribe(Box::new(move |event: &HistoryEvent| {
            sink.borrow_mut().push(event.clone());
        }));
        (lab, events)
    }

    #[test]
    fn test_sequential_runs_accumulate_history() {
        let mut lab = RegexLab::new();
        lab.record_and_match(r"\d+", "a1");
        lab.record_and_replace(r"\d+", "a1", "#");
        lab.record_and_match("[a-z]", "a1");
        assert_eq!(lab.history().get(r"\d+").unwrap().usage_count(), 2);
        assert_eq!(lab.history().len(), 2);
    }

    #[test]
    fn test_observers_hear_each_successful_record() {
        let (mut lab, events) = recording_lab();
        lab.record_and_match("a", "aaa");
        lab.record_and_match("a", "aaa");

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        match &events[1] {
            HistoryEvent::Recorded(entry) => assert_eq!(entry.usage_count(), 2),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_failed_operations_do_not_notify() {
        let (mut lab, events) = recording_lab();
        assert!(lab.record_and_match("[", "x").is_empty());
        assert!(lab.record_and_replace("(", "x", "y").is_none());
        assert!(matches!(
            lab.record_usage("*"),
            Err(LabError::InvalidPattern { .. })
        ));
        assert!(lab.remove_history("missing").is_none());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_locate_replace_and_match_each_notify_once() {
        let (mut lab, events) = recording_lab();
        assert_eq!(lab.record_and_locate(r"\d", "a1b2").len(), 2);
        assert_eq!(lab.record_and_replace(r"\d", "a1", "#").as_deref(), Some("a#"));
        assert_eq!(lab.record_and_match(r"\d", "7"), vec!["7"]);

        let events = events.borrow();
        let counts: Vec<u32> = events
            .iter()
            .map(|event| match event {
                HistoryEvent::Recorded(entry) => {
                    assert_eq!(entry.pattern(), r"\d");
                    entry.usage_count()
                }
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(counts, vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_and_clear_notify() {
        let (mut lab, events) = recording_lab();
        lab.record_usage("a").unwrap();
        lab.record_usage("b").unwrap();
        lab.remove_history("a").unwrap();
        lab.clear_history();

        let events = events.borrow();
        assert!(matches!(&events[2], HistoryEvent::Removed(e) if e.pattern() == "a"));
        assert_eq!(events[3], HistoryEvent::Cleared { removed: 1 });
    }

    #[test]
    fn test_add_history_registers_entry() {
        let mut lab = RegexLab::new();
        let entry = PatternHistoryEntry::with_usage("z+", 4, chrono::Utc::now()).unwrap();
        lab.add_history(entry).unwrap();
        assert_eq!(lab.most_used()[0].pattern(), "z+");
        assert_eq!(lab.last_used().unwrap().usage_count(), 4);
    }

    #[test]
    fn test_with_config_uses_size_limit() {
        let config = LabConfig {
            regex_size_limit: 64,
            ..LabConfig::default()
        };
        let mut lab = RegexLab::with_config(&config);
        assert!(lab.record_and_match(r"\w{100}", "x").is_empty());
        assert!(lab.history().is_empty());
    }
}
