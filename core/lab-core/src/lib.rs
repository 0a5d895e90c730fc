//! # regex-lab-core
//!
//! Core library for Regex Lab: validating regular expressions, running them
//! against text, and remembering which patterns were used, how often and when.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency.
//! - **Not thread-safe**: Callers serialize access (`&mut` borrows or a `Mutex`).
//! - **In-memory history**: Pattern history lasts as long as its [`RegexLab`].
//! - **Two failure policies**: strict operations return [`LabError`]; the
//!   interactive `record_and_*` operations degrade to empty results instead.
//!
//! ## Quick Start
//!
//! ```rust
//! use regex_lab_core::RegexLab;
//!
//! let mut lab = RegexLab::new();
//! assert_eq!(lab.record_and_replace(r"\d+", "a1b2", "#").as_deref(), Some("a#b#"));
//! assert!(lab.record_and_match("[a-z", "test").is_empty());
//! assert_eq!(lab.history().len(), 1);
//! ```

// Public modules
pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod matcher;
pub mod storage;
pub mod types;
pub mod validator;

// Re-export commonly used items at crate root
pub use analysis::{summarize, word_frequency, WordCount};
pub use config::{is_valid_timestamp_format, load_config, save_config, LabConfig};
pub use engine::RegexLab;
pub use error::{LabError, Result};
pub use history::{HistoryEvent, HistoryObserver, PatternHistoryStore};
pub use matcher::PatternMatcher;
pub use storage::StoragePaths;
pub use types::{MatchResult, PatternHistoryEntry};
pub use validator::PatternValidator;
