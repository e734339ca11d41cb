//! Destination layout and filename collision handling.
//!
//! Layout: `{root}/{Artist}/{Genre}/{Album} ({Year})/{filename}`.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use super::resolver::ResolvedMetadata;
use super::sanitize::sanitize;
use crate::metadata::{DEFAULT_ALBUM, DEFAULT_ARTIST, DEFAULT_GENRE, DEFAULT_YEAR};

/// Where a track should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLocation {
    pub artist_dir: PathBuf,
    pub genre_dir: PathBuf,
    pub album_dir: PathBuf,
    /// Kept as raw bytes so non-UTF-8 names survive the move
    pub filename: OsString,
}

impl TargetLocation {
    /// Compute the target for `metadata` under `root`. Pure: nothing is
    /// created or checked on disk.
    pub fn build(root: &Path, metadata: &ResolvedMetadata, filename: &OsStr) -> Self {
        let artist_dir = root.join(component(metadata.artist_or_default(), DEFAULT_ARTIST));
        let genre_dir = artist_dir.join(component(metadata.genre_or_default(), DEFAULT_GENRE));
        let album_dir = genre_dir.join(format!(
            "{} ({})",
            component(metadata.album_or_default(), DEFAULT_ALBUM),
            component(metadata.year_or_default(), DEFAULT_YEAR)
        ));

        Self {
            artist_dir,
            genre_dir,
            album_dir,
            filename: filename.to_os_string(),
        }
    }

    /// Full destination path.
    pub fn path(&self) -> PathBuf {
        self.album_dir.join(&self.filename)
    }

    /// Same directories, different leaf name.
    pub fn with_filename(mut self, filename: OsString) -> Self {
        self.filename = filename;
        self
    }
}

/// Sanitize a directory name. Values that sanitize to nothing fall back to
/// the placeholder so no level of the layout collapses.
fn component(value: &str, placeholder: &str) -> String {
    let clean = sanitize(value);
    if clean.is_empty() {
        placeholder.to_string()
    } else {
        clean
    }
}

/// First name of the form `name`, `base (1).ext`, `base (2).ext`, ... that
/// does not exist in `dir`.
pub fn unique_filename(dir: &Path, filename: &OsStr) -> OsString {
    next_free_name(filename, |candidate| dir.join(candidate).exists())
}

/// Like [`unique_filename`] but with the caller deciding what is taken.
/// Dry runs use this to account for names they have already handed out.
pub fn next_free_name(filename: &OsStr, is_taken: impl Fn(&OsStr) -> bool) -> OsString {
    if !is_taken(filename) {
        return filename.to_os_string();
    }

    (1u64..)
        .map(|counter| numbered_name(filename, counter))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| filename.to_os_string())
}

/// `stem (counter).ext`, byte-for-byte on the stem and extension.
/// A leading dot does not start an extension.
fn numbered_name(filename: &OsStr, counter: u64) -> OsString {
    let path = Path::new(filename);
    let mut name = path
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_else(|| filename.to_os_string());
    name.push(format!(" ({})", counter));
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::fs::File;
    use tempfile::tempdir;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// With X.mp3 .. X (N-1).mp3 taken, the next name is X (N).mp3
        #[test]
        fn collision_picks_next_counter(existing in 1usize..20) {
            let dir = tempdir().unwrap();
            File::create(dir.path().join("X.mp3")).unwrap();
            for n in 1..existing {
                File::create(dir.path().join(format!("X ({}).mp3", n))).unwrap();
            }

            let name = unique_filename(dir.path(), OsStr::new("X.mp3"));
            prop_assert_eq!(name, OsString::from(format!("X ({}).mp3", existing)));
        }

        /// Targets always stay under the destination root
        #[test]
        fn target_stays_under_root(
            artist in ".{0,30}",
            genre in ".{0,30}",
            album in ".{0,30}",
            year in ".{0,10}",
        ) {
            let root = PathBuf::from("/music/organized");
            let metadata = ResolvedMetadata {
                artist: Some(artist),
                album: Some(album),
                genre: Some(genre),
                year: Some(year),
            };
            let target = TargetLocation::build(&root, &metadata, OsStr::new("song.mp3"));
            let full = target.path();
            prop_assert!(full.starts_with(&root));
            prop_assert_eq!(full.parent(), Some(target.album_dir.as_path()));
            let depth = full.strip_prefix(&root).unwrap().components().count();
            prop_assert_eq!(depth, 4);
        }
    }
}
