use serde::Serialize;

use super::classify::classify;
use super::{ClipboardCategory, ClipboardPayload};
use crate::ids::EntryId;

/// One captured clipboard item.
///
/// Immutable once constructed: category and preview are derived from the
/// payload exactly once, in [`ClipboardEntry::new`]. Equality is identity
/// (two captures of the same text are different entries).
#[derive(Debug, Clone, Serialize)]
pub struct ClipboardEntry {
    id: EntryId,
    created_at_ms: i64,
    payload: ClipboardPayload,
    category: ClipboardCategory,
    preview_text: String,
}

impl ClipboardEntry {
    pub fn new(payload: ClipboardPayload, created_at_ms: i64) -> Self {
        Self::with_id(EntryId::new(), payload, created_at_ms)
    }

    pub fn with_id(id: EntryId, payload: ClipboardPayload, created_at_ms: i64) -> Self {
        let classification = classify(&payload);
        Self {
            id,
            created_at_ms,
            payload,
            category: classification.category,
            preview_text: classification.preview_text,
        }
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn created_at_ms(&self) -> i64 {
        self.created_at_ms
    }

    pub fn payload(&self) -> &ClipboardPayload {
        &self.payload
    }

    pub fn category(&self) -> ClipboardCategory {
        self.category
    }

    pub fn preview_text(&self) -> &str {
        &self.preview_text
    }

    /// Text used for dedup, `None` for images.
    pub fn text_content(&self) -> Option<&str> {
        self.payload.plain_text()
    }
}

impl PartialEq for ClipboardEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClipboardEntry {}
