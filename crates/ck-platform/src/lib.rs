//! Platform-specific clipboard adapter for clipkeep.

pub mod clipboard;

pub use clipboard::SystemClipboard;
