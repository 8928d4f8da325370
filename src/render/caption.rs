use std::borrow::Cow;

use crate::{
    assets::font::CaptionFont,
    foundation::core::{PixelPoint, Rgb8},
    foundation::error::{GalleryError, GalleryResult},
};

/// Fixed look of every caption block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionStyle {
    /// Font size in pixels.
    pub font_size_px: f32,
    /// Text color.
    pub text: Rgb8,
    /// Block background.
    pub background: Rgb8,
    /// Top-left of the name line, relative to the block.
    pub name_origin: PixelPoint,
    /// Top-left of the date line, relative to the block.
    pub date_origin: PixelPoint,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_size_px: 12.0,
            text: Rgb8::BLACK,
            background: Rgb8([200, 200, 200]),
            name_origin: PixelPoint::new(5, 5),
            date_origin: PixelPoint::new(5, 30),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TextBrushRgba8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

/// Parley contexts bound to a single registered caption font.
struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    fn new(font: &CaptionFont) -> GalleryResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.to_vec()), None);
        let faces: Vec<(parley::fontique::FamilyId, Vec<u32>)> = families
            .iter()
            .map(|(id, infos)| (*id, infos.iter().map(|info| info.index()).collect()))
            .collect();
        let family_id = family_for_face(&faces, font.index).ok_or_else(|| {
            GalleryError::config(format!(
                "caption font bytes hold no family for face index {}",
                font.index
            ))
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| GalleryError::config("registered caption font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

/// Family owning collection face `index`. Glyph ids drawn later come from that same face.
fn family_for_face<F: Copy>(families: &[(F, Vec<u32>)], index: u32) -> Option<F> {
    families
        .iter()
        .find(|(_, faces)| faces.contains(&index))
        .map(|(id, _)| *id)
}

struct LoadedFont {
    engine: TextLayoutEngine,
    glyphs: vello_cpu::peniko::FontData,
}

/// Rasterizes caption blocks: a filled background with two left-aligned text lines.
///
/// Without a font only the background is drawn.
pub struct CaptionRenderer {
    style: CaptionStyle,
    font: Option<LoadedFont>,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for CaptionRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionRenderer")
            .field("style", &self.style)
            .field("has_font", &self.font.is_some())
            .finish()
    }
}

impl CaptionRenderer {
    /// Build a renderer; `font` of `None` yields text-less caption blocks.
    pub fn new(style: CaptionStyle, font: Option<&CaptionFont>) -> GalleryResult<Self> {
        if !style.font_size_px.is_finite() || style.font_size_px <= 0.0 {
            return Err(GalleryError::config(
                "caption font size must be finite and > 0",
            ));
        }
        let font = match font {
            Some(f) => Some(LoadedFont {
                engine: TextLayoutEngine::new(f)?,
                glyphs: vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(f.bytes.to_vec()),
                    f.index,
                ),
            }),
            None => None,
        };
        Ok(Self {
            style,
            font,
            ctx: None,
        })
    }

    /// Whether caption text is drawn.
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Render a `width` x `height` block holding `name_line` above `date_line`.
    pub fn render(
        &mut self,
        name_line: &str,
        date_line: &str,
        width: u32,
        height: u32,
    ) -> GalleryResult<image::RgbImage> {
        let w: u16 = width
            .try_into()
            .map_err(|_| GalleryError::config("caption width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| GalleryError::config("caption height exceeds u16"))?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();

        let [br, bg, bb] = self.style.background.0;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(br, bg, bb, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        if let Some(font) = self.font.as_mut() {
            let [r, g, b] = self.style.text.0;
            let brush = TextBrushRgba8 { r, g, b, a: 255 };
            for (text, origin) in [
                (name_line, self.style.name_origin),
                (date_line, self.style.date_origin),
            ] {
                let layout = font
                    .engine
                    .layout_line(text, self.style.font_size_px, brush);
                draw_layout(&mut ctx, &font.glyphs, &layout, origin);
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        // Every pixel sits on an opaque background, so premultiplied RGB equals straight RGB.
        let rgb: Vec<u8> = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        image::RgbImage::from_raw(width, height, rgb)
            .ok_or_else(|| GalleryError::Other(anyhow::anyhow!("caption buffer size mismatch")))
    }
}

fn draw_layout(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    layout: &parley::Layout<TextBrushRgba8>,
    origin: PixelPoint,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        f64::from(origin.x),
        f64::from(origin.y),
    )));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let mut x = run.offset();
            let baseline = run.baseline();
            let glyphs: Vec<vello_cpu::Glyph> = run
                .glyphs()
                .map(|g| {
                    let glyph = vello_cpu::Glyph {
                        id: g.id,
                        x: x + g.x,
                        y: baseline - g.y,
                    };
                    x += g.advance;
                    glyph
                })
                .collect();
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs.into_iter());
        }
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
}

#[cfg(test)]
#[path = "../../tests/unit/render/caption.rs"]
mod tests;
