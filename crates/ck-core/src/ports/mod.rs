//! Port interfaces for the application layer
//!
//! Ports define the contract between the history engine and the
//! infrastructure it runs on. The platform layer implements them; the
//! application layer depends only on the traits.

pub mod clipboard;
mod clock;
mod image_preview;

pub use clipboard::{ChangeToken, ClipboardPort};
pub use clock::ClockPort;
pub use image_preview::ImagePreviewPort;
