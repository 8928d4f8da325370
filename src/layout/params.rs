use std::path::Path;

use crate::foundation::error::{GalleryError, GalleryResult};

/// Grid and per-cell geometry constants for one run.
///
/// All values are pixels except `grid_width`/`grid_height`, which count cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutParams {
    /// Cells per row.
    pub grid_width: u32,
    /// Rows per page.
    pub grid_height: u32,
    /// Thumbnail width.
    pub cell_width_px: u32,
    /// Thumbnail height.
    pub cell_height_px: u32,
    /// Horizontal gap before every column and after the last one.
    pub margin_x_px: u32,
    /// Vertical gap before every row and after the last one.
    pub margin_y_px: u32,
    /// Height of the caption block under each thumbnail.
    pub caption_height_px: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            grid_width: 4,
            grid_height: 3,
            cell_width_px: 150,
            cell_height_px: 200,
            margin_x_px: 10,
            margin_y_px: 15,
            caption_height_px: 50,
        }
    }
}

impl LayoutParams {
    /// Load and validate a JSON layout file. Missing fields keep their defaults.
    pub fn from_json_path(path: &Path) -> GalleryResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GalleryError::config(format!("cannot read layout file '{}': {e}", path.display()))
        })?;
        let params: Self = serde_json::from_str(&text).map_err(|e| {
            GalleryError::config(format!("invalid layout file '{}': {e}", path.display()))
        })?;
        params.validate()?;
        Ok(params)
    }

    /// Entries per page.
    pub fn capacity(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }

    /// Check that every constant is positive and the resulting canvas is addressable.
    pub fn validate(&self) -> GalleryResult<()> {
        for (name, value) in [
            ("grid_width", self.grid_width),
            ("grid_height", self.grid_height),
            ("cell_width_px", self.cell_width_px),
            ("cell_height_px", self.cell_height_px),
            ("margin_x_px", self.margin_x_px),
            ("margin_y_px", self.margin_y_px),
            ("caption_height_px", self.caption_height_px),
        ] {
            if value == 0 {
                return Err(GalleryError::config(format!("layout {name} must be > 0")));
            }
        }

        if self.checked_canvas_size().is_none() {
            return Err(GalleryError::config(
                "layout canvas dimensions overflow u32",
            ));
        }
        // Caption blocks go through the vector rasterizer, which addresses pixels as u16.
        if u16::try_from(self.cell_width_px).is_err()
            || u16::try_from(self.caption_height_px).is_err()
        {
            return Err(GalleryError::config(format!(
                "caption block {}x{} exceeds {}x{}",
                self.cell_width_px,
                self.caption_height_px,
                u16::MAX,
                u16::MAX
            )));
        }
        Ok(())
    }

    pub(crate) fn checked_canvas_size(&self) -> Option<(u32, u32)> {
        let col_pitch = self.cell_width_px.checked_add(self.margin_x_px)?;
        let row_pitch = self
            .cell_height_px
            .checked_add(self.margin_y_px)?
            .checked_add(self.caption_height_px)?;
        let w = self
            .grid_width
            .checked_mul(col_pitch)?
            .checked_add(self.margin_x_px)?;
        let h = self
            .grid_height
            .checked_mul(row_pitch)?
            .checked_add(self.margin_y_px)?;
        Some((w, h))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/params.rs"]
mod tests;
