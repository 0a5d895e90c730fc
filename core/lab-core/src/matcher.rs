//! Match and replace operations over the `regex` crate.
//!
//! The `*_and_record` operations are fail-soft: an empty or uncompilable
//! pattern produces an empty result (or `None`) and leaves the history alone.
//! The remaining helpers are strict and do not touch history.

use regex::{NoExpand, Regex};
use regex_syntax::hir::{print::Printer, Hir, Look};
use tracing::debug;

use crate::error::{LabError, Result};
use crate::history::PatternHistoryStore;
use crate::types::MatchResult;
use crate::validator::PatternValidator;

#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcher {
    validator: PatternValidator,
}

impl PatternMatcher {
    pub fn new(validator: PatternValidator) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &PatternValidator {
        &self.validator
    }

    /// Compiles and records `pattern`, or logs and returns `None`.
    fn compile_and_record(&self, store: &mut PatternHistoryStore, pattern: &str) -> Option<Regex> {
        match self.validator.compile(pattern) {
            Ok(regex) => {
                store.record_validated(pattern);
                Some(regex)
            }
            Err(err) => {
                debug!(error = %err, "Ignoring invalid pattern");
                None
            }
        }
    }

    /// Every non-overlapping match of `pattern` in `input`, left to right.
    pub fn find_all_and_record(
        &self,
        store: &mut PatternHistoryStore,
        pattern: &str,
        input: &str,
    ) -> Vec<String> {
        let Some(regex) = self.compile_and_record(store, pattern) else {
            return Vec::new();
        };
        regex
            .find_iter(input)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Like [`find_all_and_record`](Self::find_all_and_record) but keeps byte offsets.
    pub fn find_matches_and_record(
        &self,
        store: &mut PatternHistoryStore,
        pattern: &str,
        input: &str,
    ) -> Vec<MatchResult> {
        let Some(regex) = self.compile_and_record(store, pattern) else {
            return Vec::new();
        };
        regex
            .find_iter(input)
            .map(|m| MatchResult {
                text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
                pattern: pattern.to_string(),
            })
            .collect()
    }

    /// Replaces every match with `replacement`, inserted literally.
    ///
    /// Returns `None` when the pattern is invalid.
    pub fn find_and_replace(
        &self,
        store: &mut PatternHistoryStore,
        pattern: &str,
        input: &str,
        replacement: &str,
    ) -> Option<String> {
        let regex = self.compile_and_record(store, pattern)?;
        Some(regex.replace_all(input, NoExpand(replacement)).into_owned())
    }

    /// True when the whole of `input` matches `pattern`.
    ///
    /// The anchors are added to the parsed pattern rather than its text, so
    /// inline flags and `(?x)` comments cannot swallow them.
    pub fn is_full_match(&self, pattern: &str, input: &str) -> Result<bool> {
        self.validator.compile(pattern)?;
        let anchored = self.validator.compile(&anchored_pattern(pattern)?)?;
        Ok(anchored.is_match(input))
    }

    pub fn find_first(&self, pattern: &str, input: &str) -> Result<Option<String>> {
        let regex = self.validator.compile(pattern)?;
        Ok(regex.find(input).map(|m| m.as_str().to_string()))
    }

    pub fn count_matches(&self, pattern: &str, input: &str) -> Result<usize> {
        let regex = self.validator.compile(pattern)?;
        Ok(regex.find_iter(input).count())
    }

    /// Splits `input` around matches, dropping trailing empty pieces.
    pub fn split(&self, pattern: &str, input: &str) -> Result<Vec<String>> {
        let regex = self.validator.compile(pattern)?;
        if input.is_empty() {
            return Ok(vec![String::new()]);
        }

        let mut pieces: Vec<String> = regex.split(input).map(str::to_string).collect();
        while pieces.last().is_some_and(|p| p.is_empty()) {
            pieces.pop();
        }
        Ok(pieces)
    }
}

/// Re-renders `pattern` wrapped in start and end of text assertions.
fn anchored_pattern(pattern: &str) -> Result<String> {
    let syntax_error = |message: String| LabError::InvalidPattern {
        pattern: pattern.to_string(),
        source: regex::Error::Syntax(message),
    };

    let hir = regex_syntax::Parser::new()
        .parse(pattern)
        .map_err(|e| syntax_error(e.to_string()))?;
    let anchored = Hir::concat(vec![Hir::look(Look::Start), hir, Hir::look(Look::End)]);

    let mut rendered = String::new();
    Printer::new()
        .print(&anchored, &mut rendered)
        .map_err(|e| syntax_error(e.to_string()))?;
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabError;

    fn setup() -> (PatternMatcher, PatternHistoryStore) {
        (PatternMatcher::default(), PatternHistoryStore::new())
    }

    #[test]
    fn test_find_all_returns_matches_and_records() {
        let (matcher, mut store) = setup();
        let found = matcher.find_all_and_record(&mut store, r"\d+", "abc123def456");
        assert_eq!(found, vec!["123", "456"]);
        assert_eq!(store.get(r"\d+").unwrap().usage_count(), 1);

        matcher.find_all_and_record(&mut store, r"\d+", "no digits");
        assert_eq!(store.get(r"\d+").unwrap().usage_count(), 2);
    }

    #[test]
    fn test_find_all_invalid_pattern_is_fail_soft() {
        let (matcher, mut store) = setup();
        assert!(matcher
            .find_all_and_record(&mut store, "[a-z", "test")
            .is_empty());
        assert!(matcher.find_all_and_record(&mut store, "", "test").is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_find_all_advances_past_empty_matches() {
        let (matcher, mut store) = setup();
        let found = matcher.find_all_and_record(&mut store, "x*", "ab");
        assert_eq!(found, vec!["", "", ""]);
    }

    #[test]
    fn test_find_matches_keeps_offsets() {
        let (matcher, mut store) = setup();
        let found = matcher.find_matches_and_record(&mut store, "o", "foo");
        assert_eq!(found.len(), 2);
        assert_eq!((found[0].start, found[0].end), (1, 2));
        assert_eq!((found[1].start, found[1].end), (2, 3));
        assert_eq!(found[1].pattern, "o");
        assert_eq!(store.get("o").unwrap().usage_count(), 1);
    }

    #[test]
    fn test_replace_substitutes_every_match() {
        let (matcher, mut store) = setup();
        let replaced = matcher.find_and_replace(&mut store, r"\d+", "a1b2", "#");
        assert_eq!(replaced.as_deref(), Some("a#b#"));
        assert_eq!(store.get(r"\d+").unwrap().usage_count(), 1);
    }

    #[test]
    fn test_replace_inserts_replacement_literally() {
        let (matcher, mut store) = setup();
        let replaced = matcher.find_and_replace(&mut store, r"(\w+)", "hi", "$1$1");
        assert_eq!(replaced.as_deref(), Some("$1$1"));
    }

    #[test]
    fn test_replace_invalid_pattern_returns_none() {
        let (matcher, mut store) = setup();
        assert!(matcher
            .find_and_replace(&mut store, "(", "abc", "x")
            .is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_full_match_requires_whole_input() {
        let matcher = PatternMatcher::default();
        assert!(matcher.is_full_match("a|ab", "ab").unwrap());
        assert!(!matcher.is_full_match(r"\d+", "12a").unwrap());
        assert!(matches!(
            matcher.is_full_match("[", "x"),
            Err(LabError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_full_match_with_verbose_comment_and_flags() {
        let matcher = PatternMatcher::default();
        assert!(matcher.is_full_match("(?x)a # trailing comment", "a").unwrap());
        assert!(!matcher.is_full_match("(?x)a # trailing comment", "ab").unwrap());
        assert!(matcher.is_full_match("(?i)abc", "ABC").unwrap());
        assert!(!matcher.is_full_match("(?i)abc", "xABC").unwrap());
    }

    #[test]
    fn test_find_first_and_count() {
        let matcher = PatternMatcher::default();
        assert_eq!(
            matcher.find_first(r"\d", "a1b2").unwrap().as_deref(),
            Some("1")
        );
        assert_eq!(matcher.find_first(r"\d", "ab").unwrap(), None);
        assert_eq!(matcher.count_matches(r"\d", "a1b2c3").unwrap(), 3);
    }

    #[test]
    fn test_split_drops_trailing_empty_pieces() {
        let matcher = PatternMatcher::default();
        assert_eq!(
            matcher.split(",", "a,b,,c,,").unwrap(),
            vec!["a", "b", "", "c"]
        );
        assert_eq!(matcher.split(",", "").unwrap(), vec![""]);
        assert!(matcher.split("a", "aaa").unwrap().is_empty());
    }
}
