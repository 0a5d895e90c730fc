//! Word-level statistics over input text.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static RE_NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// Counts lowercase words, most frequent first (ties alphabetical).
pub fn word_frequency(input: &str) -> Vec<WordCount> {
    let lowered = input.to_lowercase();
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for word in RE_NON_WORD.split(&lowered).filter(|w| !w.is_empty()) {
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut words: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    words
}

/// The first `word_limit` words of `input`, followed by `...`.
pub fn summarize(input: &str, word_limit: usize) -> String {
    let words: Vec<&str> = RE_WHITESPACE
        .split(input.trim())
        .filter(|w| !w.is_empty())
        .take(word_limit)
        .collect();
    format!("{}...", words.join(" "))
}
