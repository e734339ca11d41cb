//! lofty-backed tag codec.
//!
//! Reads from the primary tag, falling back to the first tag present.
//! Writes always go to the primary tag type for the format (ID3v2 for MP3).

use lofty::config::WriteOptions;
use lofty::file::{TaggedFile, TaggedFileExt};
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey, Tag, TagExt};
use std::path::Path;

use super::{FieldChanges, TagCodec, TagError, TrackFields, present};

/// Description stored on embedded front covers.
const COVER_DESCRIPTION: &str = "Cover";

/// Tag codec for any format lofty understands.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyCodec;

impl LoftyCodec {
    pub fn new() -> Self {
        Self
    }

    fn open(path: &Path) -> Result<TaggedFile, TagError> {
        Probe::open(path)
            .map_err(|e| TagError::open(path, e))?
            .read()
            .map_err(|e| TagError::open(path, e))
    }

    /// Open the file and hand back its primary tag, inserting an empty one
    /// when the file has none of that type.
    fn with_primary_tag<F>(path: &Path, edit: F) -> Result<(), TagError>
    where
        F: FnOnce(&mut Tag),
    {
        let mut tagged_file = Self::open(path)?;
        let tag_type = tagged_file.primary_tag_type();

        if tagged_file.tag(tag_type).is_none() {
            tracing::debug!("Creating empty {:?} tag in {:?}", tag_type, path);
            tagged_file.insert_tag(Tag::new(tag_type));
        }

        let tag = tagged_file
            .tag_mut(tag_type)
            .ok_or_else(|| TagError::write(path, format!("{:?} tags unsupported", tag_type)))?;

        edit(tag);

        tag.save_to_path(path, WriteOptions::default())
            .map_err(|e| TagError::write(path, e))
    }
}

impl TagCodec for LoftyCodec {
    fn read(&self, path: &Path) -> Result<TrackFields, TagError> {
        let tagged_file = Self::open(path)?;

        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .ok_or_else(|| TagError::NoTag(path.to_path_buf()))?;

        // ID3v2 keeps the year in TDRC as a free-form date string
        let year = tag
            .get_string(&ItemKey::RecordingDate)
            .map(str::to_string)
            .or_else(|| tag.year().map(|y| y.to_string()));

        Ok(TrackFields {
            artist: present(tag.artist().map(|s| s.to_string())),
            album: present(tag.album().map(|s| s.to_string())),
            genre: present(tag.genre().map(|s| s.to_string())),
            year: present(year),
            title: present(tag.title().map(|s| s.to_string())),
        })
    }

    fn write(&self, path: &Path, changes: &FieldChanges) -> Result<(), TagError> {
        Self::with_primary_tag(path, |tag| {
            if let Some(genre) = &changes.genre {
                tag.set_genre(genre.clone());
            }
            if let Some(year) = &changes.year {
                tag.insert_text(ItemKey::RecordingDate, year.clone());
            }
        })
    }

    fn has_artwork(&self, path: &Path) -> bool {
        Self::open(path)
            .map(|tagged_file| tagged_file.tags().iter().any(|t| !t.pictures().is_empty()))
            .unwrap_or(false)
    }

    fn embed_cover(&self, path: &Path, image: &[u8]) -> Result<(), TagError> {
        // Always labelled JPEG; the fetched bytes are stored verbatim
        let picture = Picture::new_unchecked(
            PictureType::CoverFront,
            Some(MimeType::Jpeg),
            Some(COVER_DESCRIPTION.to_string()),
            image.to_vec(),
        );

        Self::with_primary_tag(path, |tag| {
            tag.remove_picture_type(PictureType::CoverFront);
            tag.push_picture(picture);
        })
    }
}
