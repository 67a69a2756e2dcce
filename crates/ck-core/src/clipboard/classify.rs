//! Content classification.
//!
//! Maps a payload to its [`ClipboardCategory`] and the preview string shown
//! in history listings. Pure and total: every payload gets a category.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ClipboardCategory, ClipboardPayload};

/// Maximum number of characters kept in a text preview.
pub const PREVIEW_MAX_CHARS: usize = 100;

const ELLIPSIS: &str = "...";
const IMAGE_PREVIEW: &str = "Image";
const UNSUPPORTED_PREVIEW: &str = "Unsupported content type";

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})[/\w .-]*/?$")
        .expect("url pattern is valid")
});

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}")
        .expect("email pattern is valid")
});

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+]?\(?[0-9]{3}\)?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,}$")
        .expect("phone pattern is valid")
});

/// Result of classifying a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: ClipboardCategory,
    pub preview_text: String,
}

impl Classification {
    /// Classification for content the engine cannot represent.
    pub fn unsupported() -> Self {
        Self {
            category: ClipboardCategory::Text,
            preview_text: UNSUPPORTED_PREVIEW.to_string(),
        }
    }
}

pub fn classify(payload: &ClipboardPayload) -> Classification {
    match payload {
        ClipboardPayload::Image { .. } => Classification {
            category: ClipboardCategory::Image,
            preview_text: IMAGE_PREVIEW.to_string(),
        },
        ClipboardPayload::Url(url) => Classification {
            category: ClipboardCategory::Url,
            preview_text: url.clone(),
        },
        ClipboardPayload::PlainText(text) | ClipboardPayload::RichText { text, .. } => {
            Classification {
                category: categorize_text(text),
                preview_text: preview_text(text),
            }
        }
    }
}

/// Category of a plain-text value. Rules are checked in precedence order.
pub fn categorize_text(text: &str) -> ClipboardCategory {
    let lowered = text.to_lowercase();
    if URL_PATTERN.is_match(text) || lowered.starts_with("http") || lowered.starts_with("www.") {
        return ClipboardCategory::Url;
    }

    if EMAIL_PATTERN.is_match(text) {
        return ClipboardCategory::Email;
    }

    // Phone numbers have no category of their own.
    if PHONE_PATTERN.is_match(text) {
        return ClipboardCategory::Text;
    }

    ClipboardCategory::Text
}

/// First [`PREVIEW_MAX_CHARS`] characters of `text`, with `"..."` appended
/// when anything was cut.
pub fn preview_text(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_MAX_CHARS) {
        Some((cut, _)) => {
            let mut preview = String::with_capacity(cut + ELLIPSIS.len());
            preview.push_str(&text[..cut]);
            preview.push_str(ELLIPSIS);
            preview
        }
        None => text.to_string(),
    }
}
