//! Pattern usage history.
//!
//! # Module Structure
//!
//! - [`store`]: the keyed in-memory store with ranked queries
//! - [`observer`]: change notifications for front ends that mirror the history

mod observer;
mod store;

pub use observer::{HistoryEvent, HistoryObserver};
pub use store::PatternHistoryStore;
