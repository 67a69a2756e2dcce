//! # ck-core
//!
//! Core domain models and business logic for clipkeep.
//!
//! This crate contains pure logic without any infrastructure dependencies:
//! content classification, the bounded history store and the ports the
//! engine needs from the outside world.

pub mod clipboard;
pub mod config;
pub mod history;
pub mod ids;
pub mod ports;

// Re-export commonly used types at the crate root
pub use clipboard::{
    CategoryFilter, ClipboardCategory, ClipboardEntry, ClipboardPayload, ImagePreview,
};
pub use config::{ConfigError, EngineConfig};
pub use history::{HistoryObservers, HistoryStore, HistoryView, MaxHistorySize, Subscription};
pub use ids::EntryId;
pub use ports::{ChangeToken, ClipboardPort, ClockPort, ImagePreviewPort};
