use std::path::PathBuf;

use crate::{
    foundation::error::{GalleryError, GalleryResult},
    gallery::paginate::index_width,
    render::compositor::Canvas,
};

/// Stem shared by every batch file.
pub const BATCH_FILE_STEM: &str = "portrait_batch_";

/// Extension of the fixed output encoding.
pub const BATCH_FILE_EXT: &str = "bmp";

/// `portrait_batch_<index>.bmp`, with `index` zero-padded for `total_pages`.
pub fn batch_file_name(page_index: usize, total_pages: usize) -> String {
    let width = index_width(total_pages);
    format!("{BATCH_FILE_STEM}{page_index:0width$}.{BATCH_FILE_EXT}")
}

/// Persists finished canvases into one output directory.
#[derive(Clone, Debug)]
pub struct BatchWriter {
    out_dir: PathBuf,
}

impl BatchWriter {
    /// Writer targeting `out_dir`; the directory must exist when [`BatchWriter::write`] runs.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Create the output directory if missing.
    pub fn ensure_out_dir(&self) -> GalleryResult<()> {
        std::fs::create_dir_all(&self.out_dir)
            .map_err(|e| GalleryError::io_write(&self.out_dir, e))
    }

    /// Encode `canvas` and write it; an existing file is overwritten. No retries.
    pub fn write(&self, canvas: &Canvas, total_pages: usize) -> GalleryResult<PathBuf> {
        let path = self
            .out_dir
            .join(batch_file_name(canvas.page_index, total_pages));
        canvas
            .pixels
            .save_with_format(&path, image::ImageFormat::Bmp)
            .map_err(|e| GalleryError::io_write(&path, e))?;
        tracing::info!(
            page = canvas.page_index,
            path = %path.display(),
            width = canvas.width(),
            height = canvas.height(),
            "wrote batch"
        );
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/writer.rs"]
mod tests;
