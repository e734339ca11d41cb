//! Test utilities and fixtures for music-organizer tests.
//!
//! The organizer moves real files, so tag fakes must travel with them.
//! [`JsonTagCodec`] stores a track's "tags" as JSON inside the file itself:
//! a file holding anything else is unreadable, exactly like a corrupt tag
//! container.
//!
//! # Example
//!
//! ```ignore
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("song.mp3");
//! write_tagged(&path, &FakeTags::new(Some("Queen"), Some("Jazz"), None, None));
//! let fields = JsonTagCodec::default().read(&path).unwrap();
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::metadata::{FieldChanges, TagCodec, TagError, TrackFields};

/// Tag contents of a fake audio file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FakeTags {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub title: Option<String>,
    pub cover: Option<Vec<u8>>,
}

impl FakeTags {
    pub fn new(
        artist: Option<&str>,
        album: Option<&str>,
        genre: Option<&str>,
        year: Option<&str>,
    ) -> Self {
        Self {
            artist: artist.map(str::to_string),
            album: album.map(str::to_string),
            genre: genre.map(str::to_string),
            year: year.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn with_cover(mut self, cover: &[u8]) -> Self {
        self.cover = Some(cover.to_vec());
        self
    }
}

/// Write a fake audio file carrying `tags`, creating parent directories.
pub fn write_tagged(path: &Path, tags: &FakeTags) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    let json = serde_json::to_vec(tags).expect("Failed to serialize fake tags");
    std::fs::write(path, json).expect("Failed to write fixture");
}

/// Read back the fake tags of a file written with [`write_tagged`].
pub fn read_tagged(path: &Path) -> FakeTags {
    let bytes = std::fs::read(path).expect("Failed to read fixture");
    serde_json::from_slice(&bytes).expect("Fixture does not hold fake tags")
}

/// Tag codec over [`FakeTags`] JSON files. Records every write.
#[derive(Default)]
pub struct JsonTagCodec {
    pub writes: Mutex<Vec<PathBuf>>,
    pub embeds: Mutex<Vec<PathBuf>>,
    /// Paths whose writes should fail
    pub failing_writes: Vec<PathBuf>,
}

impl JsonTagCodec {
    fn load(path: &Path) -> Result<FakeTags, TagError> {
        let bytes = std::fs::read(path).map_err(|e| TagError::open(path, e))?;
        serde_json::from_slice(&bytes).map_err(|_| TagError::NoTag(path.to_path_buf()))
    }

    fn store(path: &Path, tags: &FakeTags) -> Result<(), TagError> {
        let json = serde_json::to_vec(tags).map_err(|e| TagError::write(path, e))?;
        std::fs::write(path, json).map_err(|e| TagError::write(path, e))
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    pub fn embed_count(&self) -> usize {
        self.embeds.lock().unwrap().len()
    }
}

impl TagCodec for JsonTagCodec {
    fn read(&self, path: &Path) -> Result<TrackFields, TagError> {
        let tags = Self::load(path)?;
        Ok(TrackFields {
            artist: tags.artist,
            album: tags.album,
            genre: tags.genre,
            year: tags.year,
            title: tags.title,
        })
    }

    fn write(&self, path: &Path, changes: &FieldChanges) -> Result<(), TagError> {
        self.writes.lock().unwrap().push(path.to_path_buf());
        if self.failing_writes.iter().any(|p| p == path) {
            return Err(TagError::write(path, "simulated failure"));
        }
        let mut tags = Self::load(path)?;
        if let Some(genre) = &changes.genre {
            tags.genre = Some(genre.clone());
        }
        if let Some(year) = &changes.year {
            tags.year = Some(year.clone());
        }
        Self::store(path, &tags)
    }

    fn has_artwork(&self, path: &Path) -> bool {
        Self::load(path).map(|t| t.cover.is_some()).unwrap_or(false)
    }

    fn embed_cover(&self, path: &Path, image: &[u8]) -> Result<(), TagError> {
        self.embeds.lock().unwrap().push(path.to_path_buf());
        let mut tags = Self::load(path)?;
        tags.cover = Some(image.to_vec());
        Self::store(path, &tags)
    }
}

/// Build [`TrackFields`] from optional string slices.
pub fn track_fields(
    artist: Option<&str>,
    album: Option<&str>,
    genre: Option<&str>,
    year: Option<&str>,
) -> TrackFields {
    TrackFields {
        artist: artist.map(str::to_string),
        album: album.map(str::to_string),
        genre: genre.map(str::to_string),
        year: year.map(str::to_string),
        title: None,
    }
}

/// Write an untagged MP3 made of silent MPEG-1 Layer III frames
/// (128 kbps, 44.1 kHz, 417 bytes each).
pub fn write_silent_mp3(path: &Path) {
    const FRAME_LEN: usize = 417;
    const FRAMES: usize = 40;

    let mut data = Vec::with_capacity(FRAME_LEN * FRAMES);
    for _ in 0..FRAMES {
        let mut frame = vec![0u8; FRAME_LEN];
        frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
        data.extend_from_slice(&frame);
    }
    std::fs::write(path, data).expect("Failed to write MP3 fixture");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_json_codec_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        write_tagged(&path, &FakeTags::new(Some("Queen"), None, None, None));

        let codec = JsonTagCodec::default();
        let fields = codec.read(&path).unwrap();
        assert_eq!(fields.artist.as_deref(), Some("Queen"));
        assert_eq!(fields.album, None);

        codec
            .write(
                &path,
                &FieldChanges {
                    genre: Some("Rock".to_string()),
                    year: None,
                },
            )
            .unwrap();
        assert_eq!(read_tagged(&path).genre.as_deref(), Some("Rock"));
        assert_eq!(codec.write_count(), 1);
    }

    #[test]
    fn test_json_codec_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.mp3");
        std::fs::write(&path, b"\x00\x01 not tags").unwrap();

        let codec = JsonTagCodec::default();
        assert!(matches!(codec.read(&path), Err(TagError::NoTag(_))));
        assert!(!codec.has_artwork(&path));
    }

    #[test]
    fn test_json_codec_artwork() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        write_tagged(&path, &FakeTags::default());

        let codec = JsonTagCodec::default();
        assert!(!codec.has_artwork(&path));
        codec.embed_cover(&path, b"jpeg").unwrap();
        assert!(codec.has_artwork(&path));
        assert_eq!(read_tagged(&path).cover.as_deref(), Some(&b"jpeg"[..]));
    }
}
