//! Text rendering for history entries and matches.

use std::fmt::Write;

use chrono::{DateTime, Local, Utc};
use regex_lab_core::config::DEFAULT_TIMESTAMP_FORMAT;
use regex_lab_core::{is_valid_timestamp_format, MatchResult, PatternHistoryEntry, WordCount};

/// One line per entry: count, local timestamp, pattern.
///
/// An unusable `timestamp_format` falls back to the default format.
pub fn history_table(entries: &[PatternHistoryEntry], timestamp_format: &str) -> String {
    if entries.is_empty() {
        return "(no history)".to_string();
    }
    let timestamp_format = if is_valid_timestamp_format(timestamp_format) {
        timestamp_format
    } else {
        DEFAULT_TIMESTAMP_FORMAT
    };

    entries
        .iter()
        .map(|e| {
            format!(
                "{:>5}x  {}  {}",
                e.usage_count(),
                local_timestamp(e.last_used_at(), timestamp_format),
                e.pattern()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn local_timestamp(at: DateTime<Utc>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", at.with_timezone(&Local).format(format)).is_err() {
        out.clear();
        out.push_str(&at.to_rfc3339());
    }
    out
}

pub fn matches(found: &[String]) -> String {
    if found.is_empty() {
        return "(no matches)".to_string();
    }
    found
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{:>3}: {}", i + 1, m))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn positions(found: &[MatchResult]) -> String {
    if found.is_empty() {
        return "(no matches)".to_string();
    }
    found
        .iter()
        .map(|m| format!("[{}..{}] {}", m.start, m.end, m.text))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn word_counts(words: &[WordCount], top: usize) -> String {
    if words.is_empty() {
        return "(no words)".to_string();
    }
    words
        .iter()
        .take(top)
        .map(|w| format!("{:>6}  {}", w.count, w.word))
        .collect::<Vec<_>>()
        .join("\n")
}
