use std::path::PathBuf;

use crate::{
    assets::{font::CaptionFont, resolve::AssetResolver},
    foundation::error::GalleryResult,
    gallery::{model::GalleryDefinition, paginate::paginate},
    layout::params::LayoutParams,
    output::writer::BatchWriter,
    render::{
        caption::{CaptionRenderer, CaptionStyle},
        compositor::PageCompositor,
    },
};

/// Stage of a gallery run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Reading the definition.
    Loading,
    /// Ordering entries by sort key.
    Sorting,
    /// Splitting entries into pages.
    Paginating,
    /// Resolving, compositing and writing page `n`.
    Rendering(usize),
    /// All pages written.
    Done,
    /// A page failed; later pages were not rendered.
    Aborted,
}

/// Everything a run needs besides the entries themselves.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Grid geometry.
    pub layout: LayoutParams,
    /// Caption look.
    pub caption_style: CaptionStyle,
    /// Caption font; `None` renders text-less caption blocks.
    pub font: Option<CaptionFont>,
    /// Substitute for unloadable portraits.
    pub default_portrait: Option<PathBuf>,
    /// Directory receiving the batch files.
    pub out_dir: PathBuf,
}

impl RunOptions {
    /// Default layout and caption style writing into `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            layout: LayoutParams::default(),
            caption_style: CaptionStyle::default(),
            font: None,
            default_portrait: None,
            out_dir: out_dir.into(),
        }
    }
}

/// Outcome of a successful run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Number of pages the entries were split into.
    pub page_count: usize,
    /// Written batch files in page order.
    pub written: Vec<PathBuf>,
    /// Final state, always [`RunState::Done`] for a returned report.
    pub state: RunState,
}

/// Sort, paginate, render and write every page of `definition`.
///
/// Pages are processed strictly in order. The first failing page aborts the run; batch files
/// written before it are left in place.
pub fn render_gallery(
    definition: GalleryDefinition,
    options: &RunOptions,
) -> GalleryResult<RunReport> {
    let mut run = Run::default();
    let out = run.execute(definition, options);
    if let Err(e) = &out {
        let failed_in = run.state;
        run.enter(RunState::Aborted);
        tracing::error!(state = ?failed_in, error = %e, "aborting run");
    }
    out
}

#[derive(Debug)]
struct Run {
    state: RunState,
}

impl Default for Run {
    fn default() -> Self {
        Self {
            state: RunState::Loading,
        }
    }
}

impl Run {
    fn enter(&mut self, next: RunState) {
        tracing::debug!(from = ?self.state, to = ?next, "run state");
        self.state = next;
    }

    fn execute(
        &mut self,
        definition: GalleryDefinition,
        options: &RunOptions,
    ) -> GalleryResult<RunReport> {
        options.layout.validate()?;
        if options.font.is_none() {
            tracing::warn!("no caption font available; captions will carry no text");
        }
        let captions = CaptionRenderer::new(options.caption_style, options.font.as_ref())?;
        let mut compositor = PageCompositor::new(options.layout, captions)?;
        let mut resolver = AssetResolver::new(options.default_portrait.clone());
        let writer = BatchWriter::new(&options.out_dir);

        self.enter(RunState::Sorting);
        let persons = definition.into_persons();
        self.enter(RunState::Paginating);
        let pagination = paginate(persons, options.layout.capacity())?;
        let page_count = pagination.page_count();
        tracing::info!(
            persons = pagination.sorted().len(),
            pages = page_count,
            capacity = pagination.capacity(),
            "paginated"
        );

        writer.ensure_out_dir()?;
        let mut written = Vec::with_capacity(page_count);
        for page in pagination.pages() {
            self.enter(RunState::Rendering(page.index));
            let resolved = resolver.resolve_page(page)?;
            let canvas = compositor.composite(&resolved)?;
            written.push(writer.write(&canvas, page_count)?);
        }

        self.enter(RunState::Done);
        Ok(RunReport {
            page_count,
            written,
            state: self.state,
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
