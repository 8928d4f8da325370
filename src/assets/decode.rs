use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::error::GalleryResult;

/// Decoded portrait pixels, shared cheaply between pages.
#[derive(Clone, Debug)]
pub struct PortraitImage {
    /// Opaque RGB8 pixels, row-major.
    pub pixels: Arc<image::RgbImage>,
}

impl PortraitImage {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Decode encoded image bytes (format sniffed from content) into RGB8.
///
/// Alpha is dropped without blending, matching a plain paste onto an opaque canvas.
pub fn decode_image(bytes: &[u8]) -> GalleryResult<PortraitImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(PortraitImage {
        pixels: Arc::new(dyn_img.to_rgb8()),
    })
}

/// Read and decode the image at `path`.
pub fn load_image(path: &Path) -> GalleryResult<PortraitImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read image bytes from '{}'", path.display()))?;
    let image = decode_image(&bytes).with_context(|| format!("decode '{}'", path.display()))?;
    Ok(image)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
