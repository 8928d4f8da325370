use std::{path::Path, sync::Arc};

use usvg::fontdb;

use crate::foundation::error::{GalleryError, GalleryResult};

/// Family looked up first in the system font database.
pub const PREFERRED_CAPTION_FAMILY: &str = "Liberation Sans";

/// Common sans-serif families tried, in order, after [`PREFERRED_CAPTION_FAMILY`].
///
/// fontdb maps the generic sans-serif family to a single fixed name, so concrete names are listed.
pub const FALLBACK_SANS_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
    "FreeSans",
    "Open Sans",
];

/// Raw font file backing caption text.
#[derive(Clone)]
pub struct CaptionFont {
    /// Font file bytes (TrueType/OpenType, possibly a collection).
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside `bytes`.
    pub index: u32,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

impl CaptionFont {
    /// Read a font file. The first face is used.
    pub fn from_path(path: &Path) -> GalleryResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            GalleryError::config(format!("cannot read font file '{}': {e}", path.display()))
        })?;
        let mut db = fontdb::Database::new();
        db.load_font_data(bytes.clone());
        if db.is_empty() {
            return Err(GalleryError::config(format!(
                "'{}' contains no usable font faces",
                path.display()
            )));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
            index: 0,
        })
    }

    /// Look up [`PREFERRED_CAPTION_FAMILY`], then [`FALLBACK_SANS_FAMILIES`], among installed
    /// fonts. Failing those, any upright regular proportional face is used, sans families first.
    pub fn from_system() -> Option<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self::from_database(&db)
    }

    fn from_database(db: &fontdb::Database) -> Option<Self> {
        let families: Vec<fontdb::Family<'_>> = std::iter::once(PREFERRED_CAPTION_FAMILY)
            .chain(FALLBACK_SANS_FAMILIES.iter().copied())
            .map(fontdb::Family::Name)
            .collect();
        let query = fontdb::Query {
            families: &families,
            ..Default::default()
        };
        let id = db.query(&query).or_else(|| last_resort_face(db))?;
        let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
        if let Some(face) = db.face(id) {
            tracing::debug!(
                family = face.families.first().map(|(name, _)| name.as_str()).unwrap_or("?"),
                index,
                "caption font resolved from system fonts"
            );
        }
        Some(Self {
            bytes: Arc::new(bytes),
            index,
        })
    }
}

fn last_resort_face(db: &fontdb::Database) -> Option<fontdb::ID> {
    let regular: Vec<&fontdb::FaceInfo> = db
        .faces()
        .filter(|f| !f.monospaced)
        .filter(|f| f.style == fontdb::Style::Normal && f.weight == fontdb::Weight::NORMAL)
        .collect();
    let is_sans = |f: &fontdb::FaceInfo| f.families.iter().any(|(name, _)| name.contains("Sans"));
    regular
        .iter()
        .copied()
        .find(|f| is_sans(f))
        .or_else(|| regular.first().copied())
        .map(|f| f.id)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
