use anyhow::Result;

use crate::clipboard::ImagePreview;

/// Decodes encoded image bytes into the preview kept alongside an image
/// entry.
///
/// Called on the capture path, off the runtime task.
pub trait ImagePreviewPort: Send + Sync {
    fn decode_preview(&self, image_bytes: &[u8]) -> Result<ImagePreview>;
}
