//! Change token sources.
//!
//! macOS and Windows expose a counter that the OS bumps on every clipboard
//! write. Elsewhere the token is derived from a fingerprint of the current
//! content.

mod fingerprint;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(windows)]
mod windows;

pub(crate) use fingerprint::{content_fingerprint, FingerprintTracker};

/// The OS change counter, when the platform has one.
#[cfg(target_os = "macos")]
pub(crate) fn native_change_count() -> Option<u64> {
    macos::pasteboard_change_count()
}

#[cfg(windows)]
pub(crate) fn native_change_count() -> Option<u64> {
    windows::clipboard_sequence_number()
}

#[cfg(not(any(target_os = "macos", windows)))]
pub(crate) fn native_change_count() -> Option<u64> {
    None
}
