use crate::{
    foundation::core::{PixelPoint, PixelRect},
    layout::params::LayoutParams,
};

/// Grid slot within a page, 0-based, row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellPosition {
    /// Column, `0..grid_width`.
    pub column: u32,
    /// Row, `0..grid_height`.
    pub row: u32,
}

impl CellPosition {
    /// Position of the `slot`-th member of a page (column varies fastest).
    pub fn from_slot(slot: usize, grid_width: u32) -> Self {
        let w = grid_width as usize;
        Self {
            column: (slot % w) as u32,
            row: (slot / w) as u32,
        }
    }
}

/// Pixel placement of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPlacement {
    /// Top-left corner of the thumbnail.
    pub thumb_origin: PixelPoint,
    /// Top-left corner of the caption block, directly below the thumbnail.
    pub caption_origin: PixelPoint,
}

impl CellPlacement {
    /// Thumbnail area for `params`.
    pub fn thumb_rect(&self, params: &LayoutParams) -> PixelRect {
        PixelRect::new(
            self.thumb_origin,
            params.cell_width_px,
            params.cell_height_px,
        )
    }

    /// Caption area for `params`.
    pub fn caption_rect(&self, params: &LayoutParams) -> PixelRect {
        PixelRect::new(
            self.caption_origin,
            params.cell_width_px,
            params.caption_height_px,
        )
    }

    /// Thumbnail and caption together.
    pub fn cell_rect(&self, params: &LayoutParams) -> PixelRect {
        PixelRect::new(
            self.thumb_origin,
            params.cell_width_px,
            params.cell_height_px + params.caption_height_px,
        )
    }
}

/// Compute the thumbnail and caption origins of `pos`.
///
/// Pure; `pos` must lie inside the grid and `params` must be validated.
pub fn place(params: &LayoutParams, pos: CellPosition) -> CellPlacement {
    let x = pos.column * (params.cell_width_px + params.margin_x_px) + params.margin_x_px;
    let y = pos.row * (params.cell_height_px + params.margin_y_px + params.caption_height_px)
        + params.margin_y_px;
    CellPlacement {
        thumb_origin: PixelPoint::new(x, y),
        caption_origin: PixelPoint::new(x, y + params.cell_height_px),
    }
}

/// Canvas `(width_px, height_px)` for `params`.
pub fn canvas_size(params: &LayoutParams) -> (u32, u32) {
    let w = params.grid_width * (params.cell_width_px + params.margin_x_px) + params.margin_x_px;
    let h = params.grid_height
        * (params.cell_height_px + params.margin_y_px + params.caption_height_px)
        + params.margin_y_px;
    (w, h)
}

/// Positions of the first `count` slots of a page in row-major order.
pub fn cell_positions(params: &LayoutParams, count: usize) -> impl Iterator<Item = CellPosition> {
    let grid_width = params.grid_width;
    (0..count).map(move |slot| CellPosition::from_slot(slot, grid_width))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
