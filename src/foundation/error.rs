use std::path::PathBuf;

/// Convenience result type used across the gallery engine.
pub type GalleryResult<T> = Result<T, GalleryError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is fatal for the run that raised it; there is no per-page partial success.
#[derive(thiserror::Error, Debug)]
pub enum GalleryError {
    /// Invalid or missing command line arguments, paths or layout constants.
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed definition file.
    #[error("parse error: {0}")]
    Parse(String),

    /// A portrait (and its fallback, if any) could not be loaded.
    #[error(
        "asset unavailable: could not open image file for {person}: {}",
        .path.display()
    )]
    AssetUnavailable {
        /// Display name of the affected person, `"family, given"`.
        person: String,
        /// Portrait path that failed to load.
        path: PathBuf,
    },

    /// A finished batch could not be persisted.
    #[error("write error: {}: {source}", .path.display())]
    IoWrite {
        /// Target file path.
        path: PathBuf,
        /// Underlying encoder or filesystem error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A page-creation call received zero persons.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GalleryError {
    /// Build a [`GalleryError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`GalleryError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`GalleryError::EmptyInput`] value.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Build a [`GalleryError::AssetUnavailable`] value.
    pub fn asset_unavailable(person: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::AssetUnavailable {
            person: person.into(),
            path: path.into(),
        }
    }

    /// Build a [`GalleryError::IoWrite`] value.
    pub fn io_write(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::IoWrite {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Process exit code for this error class. Success is always `0`.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Other(_) => 1,
            Self::Config(_) => 2,
            Self::Parse(_) => 3,
            Self::AssetUnavailable { .. } => 4,
            Self::IoWrite { .. } => 5,
            Self::EmptyInput(_) => 6,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
