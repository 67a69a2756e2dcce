//! Bounded, deduplicating clipboard history.

mod capacity;
mod observers;
mod store;

use std::sync::Arc;

use crate::clipboard::ClipboardEntry;

pub use capacity::MaxHistorySize;
pub use observers::{HistoryObservers, Subscription};
pub use store::HistoryStore;

/// Ordered, most-recent-first snapshot of the history.
pub type HistoryView = Vec<Arc<ClipboardEntry>>;
