//! Portrait gallery renders paginated contact sheets of people.
//!
//! Given a roster of persons with portraits and captions, it produces a sequence of fixed-size
//! canvases ("batches"), each a grid of thumbnail + caption cells, written as BMP files.
//!
//! # Pipeline overview
//!
//! 1. **Load**: YAML definition -> validated [`GalleryDefinition`]
//! 2. **Paginate**: stable sort by sort key, split into pages of `grid_width * grid_height`
//! 3. **Resolve**: decode every portrait of a page (default portrait fallback) before drawing
//! 4. **Composite**: place and draw each cell onto a fresh [`Canvas`]
//! 5. **Write**: `portrait_batch_<index>.bmp`, index zero-padded to the page count
//!
//! A single unresolvable portrait aborts its whole page and therefore the run; batches written
//! before it stay on disk.
//!
//! Rendering is deterministic: identical input and layout produce byte-identical files.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod gallery;
mod layout;
mod output;
mod pipeline;
mod render;

pub use assets::decode::{PortraitImage, decode_image, load_image};
pub use assets::font::{CaptionFont, FALLBACK_SANS_FAMILIES, PREFERRED_CAPTION_FAMILY};
pub use assets::resolve::{AssetResolver, ResolvedPage, ResolvedPerson};
pub use foundation::core::{PixelPoint, PixelRect, Rgb8};
pub use foundation::error::{GalleryError, GalleryResult};
pub use gallery::model::{GalleryDefinition, Person, SortKey};
pub use gallery::paginate::{Page, Pagination, index_width, paginate};
pub use layout::params::LayoutParams;
pub use layout::placement::{CellPlacement, CellPosition, canvas_size, cell_positions, place};
pub use output::writer::{BATCH_FILE_EXT, BATCH_FILE_STEM, BatchWriter, batch_file_name};
pub use pipeline::{RunOptions, RunReport, RunState, render_gallery};
pub use render::caption::{CaptionRenderer, CaptionStyle};
pub use render::compositor::{CANVAS_BACKGROUND, Canvas, PageCompositor, THUMBNAIL_FILTER};
