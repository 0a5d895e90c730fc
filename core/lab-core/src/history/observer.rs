//! History change notifications.
//!
//! The store itself holds plain data. The [`RegexLab`](crate::RegexLab) facade
//! emits a [`HistoryEvent`] to every subscribed observer after each successful
//! mutation, so a display layer can refresh without binding to the store.

use crate::types::PatternHistoryEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    /// A pattern was recorded or registered; carries the entry after the change.
    Recorded(PatternHistoryEntry),
    Removed(PatternHistoryEntry),
    Cleared { removed: usize },
}

/// Receives history change notifications.
pub trait HistoryObserver {
    fn on_history_event(&self, event: &HistoryEvent);
}

impl<F> HistoryObserver for F
where
    F: Fn(&HistoryEvent),
{
    fn on_history_event(&self, event: &HistoryEvent) {
        self(event)
    }
}
