use std::sync::Mutex;

use ck_core::ChangeToken;
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};

const PREFERRED_IMAGE_FORMAT: &str = "image/png";

/// Hash of everything the engine could read from the clipboard right now.
///
/// Runs on every poll tick, so images are hashed in the encoded form the
/// clipboard hands out and never decoded.
pub(crate) fn content_fingerprint(ctx: &ClipboardContext) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();

    let formats = ctx.available_formats().unwrap_or_default();
    for format in &formats {
        hasher.update(format.as_bytes());
        hasher.update(&[0]);
    }
    if let Ok(text) = ctx.get_text() {
        hasher.update(b"text\0");
        hasher.update(text.as_bytes());
    }
    if ctx.has(ContentFormat::Files) {
        if let Ok(files) = ctx.get_files() {
            hasher.update(b"files\0");
            hasher.update(files.join("\n").as_bytes());
        }
    }
    if ctx.has(ContentFormat::Rtf) {
        if let Ok(rtf) = ctx.get_rich_text() {
            hasher.update(b"rtf\0");
            hasher.update(rtf.as_bytes());
        }
    }
    if let Some(format) = image_format(&formats) {
        if let Ok(encoded) = ctx.get_buffer(format) {
            hasher.update(b"image\0");
            hasher.update(&(encoded.len() as u64).to_le_bytes());
            hasher.update(&encoded);
        }
    }

    hasher.finalize()
}

/// The image format to fingerprint, preferring PNG when several are offered.
fn image_format(formats: &[String]) -> Option<&str> {
    formats
        .iter()
        .find(|format| format.as_str() == PREFERRED_IMAGE_FORMAT)
        .or_else(|| formats.iter().find(|format| format.starts_with("image/")))
        .map(String::as_str)
}

#[derive(Debug, Default)]
struct TrackerState {
    last: Option<blake3::Hash>,
    token: u64,
}

/// Turns a stream of content fingerprints into a monotonically increasing
/// change token.
#[derive(Debug, Default)]
pub(crate) struct FingerprintTracker {
    state: Mutex<TrackerState>,
}

impl FingerprintTracker {
    pub(crate) fn observe(&self, fingerprint: blake3::Hash) -> ChangeToken {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        match state.last {
            Some(last) if last == fingerprint => {}
            Some(_) => {
                state.token += 1;
                state.last = Some(fingerprint);
            }
            None => state.last = Some(fingerprint),
        }
        ChangeToken(state.token)
    }

    /// Last token handed out, without looking at the clipboard.
    pub(crate) fn current(&self) -> ChangeToken {
        ChangeToken(self.state.lock().unwrap_or_else(|p| p.into_inner()).token)
    }
}
