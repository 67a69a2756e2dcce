use std::io::Cursor;

use anyhow::{Context, Result};
use ck_core::{ImagePreview, ImagePreviewPort};
use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageFormat};
use tracing::debug;

/// Decodes clipboard image bytes into dimensions plus a small PNG
/// thumbnail.
#[derive(Debug, Clone, Copy)]
pub struct ImagePreviewDecoder {
    max_edge: u32,
}

impl ImagePreviewDecoder {
    pub const DEFAULT_MAX_EDGE: u32 = 128;

    pub fn new(max_edge: u32) -> Self {
        Self {
            max_edge: max_edge.max(1),
        }
    }
}

impl Default for ImagePreviewDecoder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_EDGE)
    }
}

impl ImagePreviewPort for ImagePreviewDecoder {
    fn decode_preview(&self, image_bytes: &[u8]) -> Result<ImagePreview> {
        let decoded =
            image::load_from_memory(image_bytes).context("decode clipboard image bytes")?;
        let (width, height) = decoded.dimensions();
        let (target_width, target_height) = calculate_target_size(width, height, self.max_edge);

        let thumbnail = if target_width == width && target_height == height {
            decoded
        } else {
            decoded.resize_exact(target_width, target_height, FilterType::Triangle)
        };

        let mut png = Vec::new();
        DynamicImage::ImageRgba8(thumbnail.to_rgba8())
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .context("encode preview thumbnail as png")?;

        debug!(
            width,
            height,
            thumbnail_bytes = png.len(),
            "Decoded clipboard image preview"
        );
        Ok(ImagePreview::new(width, height).with_thumbnail(png))
    }
}

fn calculate_target_size(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }

    if width >= height {
        let scaled = (f64::from(height) * f64::from(max_edge) / f64::from(width)).round() as u32;
        (max_edge, scaled.max(1))
    } else {
        let scaled = (f64::from(width) * f64::from(max_edge) / f64::from(height)).round() as u32;
        (scaled.max(1), max_edge)
    }
}
