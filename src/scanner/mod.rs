use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension (case-insensitive) of files the organizer handles.
pub const AUDIO_EXTENSION: &str = "mp3";

/// Scans the given root directory recursively for MP3 files.
///
/// The walk is lazy: files are yielded as directories are read, so a caller
/// that moves files while iterating sees a consistent view of what is left.
/// Anything under `exclude` (typically the destination tree when it lives
/// inside the source tree) is pruned. Unreadable directory entries are
/// skipped. Calling `scan` again restarts the walk from scratch.
pub fn scan(root: &Path, exclude: Option<&Path>) -> impl Iterator<Item = PathBuf> {
    let exclude = exclude.map(Path::to_path_buf);

    WalkDir::new(root)
        .into_iter()
        .filter_entry(move |entry| match &exclude {
            Some(excluded) => entry.depth() == 0 || !entry.path().starts_with(excluded),
            None => true,
        })
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_audio_file(path))
}

/// Check if a path has the audio extension
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(AUDIO_EXTENSION))
}
