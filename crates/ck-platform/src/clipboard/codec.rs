use anyhow::{anyhow, Result};
use ck_core::{ClipboardPayload, ImagePreview, ImagePreviewPort};
use clipboard_rs::common::RustImage;
use clipboard_rs::{Clipboard, ClipboardContent, ClipboardContext, ContentFormat, RustImageData};
use log::{debug, warn};

use super::rtf::rtf_to_plain_text;

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

/// Read the clipboard as a single payload.
///
/// Precedence: plain text, image, file/URL list, rich text. `None` when
/// none of these is present.
pub(crate) fn read_payload(
    ctx: &mut ClipboardContext,
    previews: &dyn ImagePreviewPort,
) -> Result<Option<ClipboardPayload>> {
    if ctx.has(ContentFormat::Text) {
        if let Ok(text) = ctx.get_text() {
            if !text.is_empty() {
                return Ok(Some(ClipboardPayload::PlainText(text)));
            }
        }
    }

    if ctx.has(ContentFormat::Image) {
        let image = map_clipboard_err(ctx.get_image())?;
        let png = map_clipboard_err(image.to_png())?;
        let bytes = png.get_bytes().to_vec();
        let preview = previews.decode_preview(&bytes).unwrap_or_else(|err| {
            warn!("Failed to decode clipboard image preview: {err:#}");
            let (width, height) = image.get_size();
            ImagePreview::new(width, height)
        });
        return Ok(Some(ClipboardPayload::Image { bytes, preview }));
    }

    if ctx.has(ContentFormat::Files) {
        if let Ok(files) = ctx.get_files() {
            if let Some(first) = files.into_iter().find(|f| !f.trim().is_empty()) {
                return Ok(Some(ClipboardPayload::Url(file_url(first.trim()))));
            }
        }
    }

    if ctx.has(ContentFormat::Rtf) {
        if let Ok(rtf) = ctx.get_rich_text() {
            let text = rtf_to_plain_text(&rtf);
            return Ok(Some(ClipboardPayload::RichText {
                text,
                rtf: rtf.into_bytes(),
            }));
        }
    }

    debug!("Clipboard holds no supported format");
    Ok(None)
}

/// Write `payload` as the clipboard's only content.
pub(crate) fn write_payload(ctx: &mut ClipboardContext, payload: &ClipboardPayload) -> Result<()> {
    match payload {
        ClipboardPayload::PlainText(text) => map_clipboard_err(ctx.set_text(text.clone())),
        ClipboardPayload::Url(url) => map_clipboard_err(ctx.set_text(url.clone())),
        ClipboardPayload::RichText { text, rtf } => map_clipboard_err(ctx.set(vec![
            ClipboardContent::Rtf(String::from_utf8_lossy(rtf).into_owned()),
            ClipboardContent::Text(text.clone()),
        ])),
        ClipboardPayload::Image { bytes, .. } => {
            let image = RustImageData::from_bytes(bytes).map_err(|e| anyhow!(e))?;
            map_clipboard_err(ctx.set_image(image))
        }
    }
}

fn file_url(entry: &str) -> String {
    if entry.contains("://") {
        entry.to_string()
    } else {
        format!("file://{entry}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_become_file_urls() {
        assert_eq!(file_url("/tmp/report.pdf"), "file:///tmp/report.pdf");
        assert_eq!(
            file_url("file:///Users/me/a.txt"),
            "file:///Users/me/a.txt"
        );
        assert_eq!(file_url("https://example.com"), "https://example.com");
    }
}
