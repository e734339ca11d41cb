//! Embedded track metadata: the fields we place files by, and the codec seam
//! used to read and rewrite them.
//!
//! Presence is modelled with `Option` throughout. The literal "Unknown ..."
//! strings are only rendered when building paths, catalog queries, or log
//! output, so a tag that genuinely reads "Unknown Artist" is still a value.
//!
//! The production codec ([`LoftyCodec`]) is built on the lofty crate. Tests
//! substitute an in-file JSON codec so no real MP3 fixtures are needed.

mod codec;

pub use codec::LoftyCodec;

use std::path::{Path, PathBuf};

/// Placeholder rendered for a missing artist.
pub const DEFAULT_ARTIST: &str = "Unknown Artist";
/// Placeholder rendered for a missing album.
pub const DEFAULT_ALBUM: &str = "Unknown Album";
/// Placeholder rendered for a missing genre.
pub const DEFAULT_GENRE: &str = "Unknown Genre";
/// Placeholder rendered for a missing year.
pub const DEFAULT_YEAR: &str = "Unknown Year";

/// Fields read from a track's tag container.
///
/// Empty or whitespace-only tag values are normalized to `None` on read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackFields {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub title: Option<String>,
}

impl TrackFields {
    /// Use the file stem as the title when the tag carries none.
    pub fn with_title_fallback(mut self, path: &Path) -> Self {
        if self.title.is_none() {
            self.title = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned());
        }
        self
    }
}

/// Drop empty and whitespace-only values.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Fields that resolution decided to fill in. Only ever populated for
/// fields that were missing on the track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldChanges {
    pub genre: Option<String>,
    pub year: Option<String>,
}

impl FieldChanges {
    pub fn is_empty(&self) -> bool {
        self.genre.is_none() && self.year.is_none()
    }

    /// Names of the changed fields, for logging.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.genre.is_some() {
            names.push("genre");
        }
        if self.year.is_some() {
            names.push("year");
        }
        names
    }
}

/// Errors from reading or writing a tag container.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TagError {
    #[error("Failed to open {path}: {message}")]
    Open { path: PathBuf, message: String },

    #[error("No tag container in {0}")]
    NoTag(PathBuf),

    #[error("Failed to write tags to {path}: {message}")]
    Write { path: PathBuf, message: String },
}

impl TagError {
    pub fn open(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Open {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Write {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Reads and rewrites the tag container of a single file.
///
/// Implementations must be stateless with respect to paths: the organizer
/// moves files between calls, so the file itself is the source of truth.
pub trait TagCodec {
    /// Read the placement fields. Fails when the file has no readable tag
    /// container.
    fn read(&self, path: &Path) -> Result<TrackFields, TagError>;

    /// Persist only the changed fields, creating a tag container when the
    /// file has none of its primary type.
    fn write(&self, path: &Path, changes: &FieldChanges) -> Result<(), TagError>;

    /// Whether any tag on the file already carries a picture. Unreadable
    /// files report `false`.
    fn has_artwork(&self, path: &Path) -> bool;

    /// Store `image` as the front cover, replacing any existing front cover.
    fn embed_cover(&self, path: &Path, image: &[u8]) -> Result<(), TagError>;
}
