use image::imageops::{self, FilterType};

use crate::{
    assets::resolve::ResolvedPage,
    foundation::core::Rgb8,
    foundation::error::{GalleryError, GalleryResult},
    layout::params::LayoutParams,
    layout::placement::{canvas_size, cell_positions, place},
    render::caption::CaptionRenderer,
};

/// Background of every page canvas.
pub const CANVAS_BACKGROUND: Rgb8 = Rgb8::WHITE;

/// Resampling filter used to scale portraits onto their thumbnail cell.
pub const THUMBNAIL_FILTER: FilterType = FilterType::Lanczos3;

/// A finished page, ready to be written.
#[derive(Clone, Debug)]
pub struct Canvas {
    /// Page index this canvas was rendered for.
    pub page_index: usize,
    /// Opaque RGB8 pixels.
    pub pixels: image::RgbImage,
}

impl Canvas {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Draws resolved pages onto fixed-size canvases.
#[derive(Debug)]
pub struct PageCompositor {
    params: LayoutParams,
    captions: CaptionRenderer,
}

impl PageCompositor {
    /// Create a compositor for validated `params`.
    pub fn new(params: LayoutParams, captions: CaptionRenderer) -> GalleryResult<Self> {
        params.validate()?;
        Ok(Self { params, captions })
    }

    /// Render `page` onto a fresh canvas.
    ///
    /// Members fill the grid row-major from the top-left cell. Portraits are scaled, not cropped,
    /// to exactly one cell.
    #[tracing::instrument(
        skip(self, page),
        fields(page = page.index, members = page.members.len())
    )]
    pub fn composite(&mut self, page: &ResolvedPage<'_>) -> GalleryResult<Canvas> {
        let p = self.params;
        if page.members.is_empty() {
            return Err(GalleryError::empty_input(format!(
                "page {} has no members",
                page.index
            )));
        }
        if page.members.len() > p.capacity() {
            return Err(GalleryError::config(format!(
                "page {} holds {} members but the grid fits {}",
                page.index,
                page.members.len(),
                p.capacity()
            )));
        }

        let (width_px, height_px) = canvas_size(&p);
        let mut pixels =
            image::RgbImage::from_pixel(width_px, height_px, CANVAS_BACKGROUND.to_pixel());

        for (member, pos) in page
            .members
            .iter()
            .zip(cell_positions(&p, page.members.len()))
        {
            let cell = place(&p, pos);
            tracing::debug!(
                column = pos.column,
                row = pos.row,
                x = cell.thumb_origin.x,
                y = cell.thumb_origin.y,
                fallback = member.used_fallback,
                "draw cell"
            );

            let thumb = imageops::resize(
                member.image.pixels.as_ref(),
                p.cell_width_px,
                p.cell_height_px,
                THUMBNAIL_FILTER,
            );
            imageops::replace(
                &mut pixels,
                &thumb,
                i64::from(cell.thumb_origin.x),
                i64::from(cell.thumb_origin.y),
            );

            let caption = self.captions.render(
                &member.person.caption_name(),
                &member.person.date_of_entry,
                p.cell_width_px,
                p.caption_height_px,
            )?;
            imageops::replace(
                &mut pixels,
                &caption,
                i64::from(cell.caption_origin.x),
                i64::from(cell.caption_origin.y),
            );
        }

        Ok(Canvas {
            page_index: page.index,
            pixels,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
