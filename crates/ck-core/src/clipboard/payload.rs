use serde::{Deserialize, Serialize};

/// Decoded metadata for an image payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePreview {
    pub width: u32,
    pub height: u32,

    /// Downscaled PNG used by consumers for list rendering, if one could be produced.
    pub thumbnail: Option<Vec<u8>>,
}

impl ImagePreview {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            thumbnail: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: Vec<u8>) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }
}

/// Native clipboard content, as read from or written to the system clipboard.
///
/// Only the four kinds the engine understands are representable; anything
/// else is reported by the port as "no content".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ClipboardPayload {
    PlainText(String),

    /// Formatted text. `rtf` holds the RTF document, `text` its plain-text fallback.
    RichText { text: String, rtf: Vec<u8> },

    /// Encoded image bytes (PNG) plus the decoded preview.
    Image { bytes: Vec<u8>, preview: ImagePreview },

    /// Absolute URL string.
    Url(String),
}

impl ClipboardPayload {
    pub fn text(text: impl Into<String>) -> Self {
        Self::PlainText(text.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// Plain-text representation used for classification and dedup.
    ///
    /// `None` for images.
    pub fn plain_text(&self) -> Option<&str> {
        match self {
            Self::PlainText(text) => Some(text),
            Self::RichText { text, .. } => Some(text),
            Self::Url(url) => Some(url),
            Self::Image { .. } => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::PlainText(_) => "plain_text",
            Self::RichText { .. } => "rich_text",
            Self::Image { .. } => "image",
            Self::Url(_) => "url",
        }
    }

    /// Size of the native data in bytes.
    pub fn size_bytes(&self) -> usize {
        match self {
            Self::PlainText(text) | Self::Url(text) => text.len(),
            Self::RichText { text, rtf } => text.len() + rtf.len(),
            Self::Image { bytes, .. } => bytes.len(),
        }
    }
}
