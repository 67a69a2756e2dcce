//! Clipboard domain models.
mod category;
pub mod classify;
mod entry;
mod payload;

pub use category::{CategoryFilter, ClipboardCategory};
pub use classify::{classify, Classification};
pub use entry::ClipboardEntry;
pub use payload::{ClipboardPayload, ImagePreview};
