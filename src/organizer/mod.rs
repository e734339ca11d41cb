//! File organization: resolve each track's metadata and move it into
//! `{Artist}/{Genre}/{Album} ({Year})/` under the destination root.
//!
//! # Flow per file
//! 1. Parse the tag container (unreadable → skipped, file left in place)
//! 2. Resolve missing fields against the catalog
//! 3. Write back any fields the catalog filled in
//! 4. Create the album directory (failure → skipped)
//! 5. Pick a collision-free filename
//! 6. Move (failure → skipped; tag changes stay on the source file)
//! 7. Embed cover art when the moved file has none
//!
//! Steps 1-2 plus target computation form a [`FilePlan`] and involve no
//! filesystem writes. Every failure is recorded as a [`FileOutcome`] and the
//! walk continues with the next file.

mod resolver;
mod sanitize;
mod target;

pub use resolver::{MetadataResolver, Resolution, ResolvedMetadata, merge};
pub use sanitize::{first_artist, sanitize};
pub use target::{TargetLocation, next_free_name, unique_filename};

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::catalog::{ArtworkApi, CatalogApi, LookupOutcome};
use crate::error::{Error, Result, ResultExt};
use crate::metadata::{FieldChanges, TagCodec, TagError};
use crate::scanner;

/// Settings for one organize run.
#[derive(Debug, Clone)]
pub struct OrganizeOptions {
    /// Root of the organized tree
    pub destination: PathBuf,
    /// Rename on filename collisions; when off, a collision skips the file
    pub handle_duplicates: bool,
    /// Plan only: no tag writes, directories, moves or artwork
    pub dry_run: bool,
}

impl OrganizeOptions {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            handle_duplicates: true,
            dry_run: false,
        }
    }
}

/// Everything decided about a file before touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePlan {
    pub source: PathBuf,
    pub resolution: Resolution,
    /// Target with the source's own filename; collisions are resolved later
    pub target: TargetLocation,
}

impl FilePlan {
    pub fn new(source: &Path, resolution: Resolution, destination_root: &Path) -> Self {
        let filename = source.file_name().map(OsStr::to_os_string).unwrap_or_default();
        let target = TargetLocation::build(destination_root, &resolution.metadata, &filename);

        Self {
            source: source.to_path_buf(),
            resolution,
            target,
        }
    }
}

/// Result of writing resolved fields back to the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagWriteOutcome {
    /// Nothing was filled in
    Unchanged,
    Written,
    /// The write failed; the file is still moved
    Failed(String),
}

/// Result of the cover art step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtworkOutcome {
    /// The catalog offered no artwork URL
    NotRequested,
    /// The moved file already carries a picture
    AlreadyPresent,
    Embedded,
    /// Download or embed failed; the move still stands
    Failed(String),
}

/// Terminal state of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Moved {
        source: PathBuf,
        destination: PathBuf,
        lookup: LookupOutcome,
        tags: TagWriteOutcome,
        artwork: ArtworkOutcome,
    },
    /// Dry run: where the file would go
    Planned {
        source: PathBuf,
        destination: PathBuf,
        changes: FieldChanges,
    },
    SkippedUnreadable {
        source: PathBuf,
        reason: String,
    },
    SkippedIoError {
        source: PathBuf,
        reason: String,
    },
}

impl FileOutcome {
    pub fn source(&self) -> &Path {
        match self {
            FileOutcome::Moved { source, .. }
            | FileOutcome::Planned { source, .. }
            | FileOutcome::SkippedUnreadable { source, .. }
            | FileOutcome::SkippedIoError { source, .. } => source,
        }
    }

    /// Final (or planned) location, if the file got one.
    pub fn destination(&self) -> Option<&Path> {
        match self {
            FileOutcome::Moved { destination, .. } | FileOutcome::Planned { destination, .. } => {
                Some(destination)
            }
            _ => None,
        }
    }
}

/// All outcomes of a run, in walk order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }

    pub fn moved(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Moved { .. }))
    }

    pub fn planned(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Planned { .. }))
    }

    pub fn skipped_unreadable(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::SkippedUnreadable { .. }))
    }

    pub fn skipped_io(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::SkippedIoError { .. }))
    }

    pub fn tags_written(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                FileOutcome::Moved {
                    tags: TagWriteOutcome::Written,
                    ..
                }
            )
        })
    }

    pub fn artwork_embedded(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                FileOutcome::Moved {
                    artwork: ArtworkOutcome::Embedded,
                    ..
                }
            )
        })
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.planned() > 0 {
            write!(f, "{} planned, ", self.planned())?;
        }
        write!(
            f,
            "{} moved, {} tagged, {} covers embedded, {} unreadable, {} I/O errors",
            self.moved(),
            self.tags_written(),
            self.artwork_embedded(),
            self.skipped_unreadable(),
            self.skipped_io()
        )
    }
}

/// Walks a source tree and places every MP3 it finds.
pub struct Organizer<'a> {
    codec: &'a dyn TagCodec,
    resolver: MetadataResolver<'a>,
    artwork: &'a dyn ArtworkApi,
    options: OrganizeOptions,
}

impl<'a> Organizer<'a> {
    pub fn new(
        codec: &'a dyn TagCodec,
        catalog: &'a dyn CatalogApi,
        artwork: &'a dyn ArtworkApi,
        options: OrganizeOptions,
    ) -> Self {
        Self {
            codec,
            resolver: MetadataResolver::new(catalog),
            artwork,
            options,
        }
    }

    /// Organize every MP3 under `source`. Never fails: a missing source or
    /// an uncreatable destination yields an empty summary.
    pub async fn run(&self, source: &Path) -> RunSummary {
        let mut summary = RunSummary::default();

        if !source.is_dir() {
            warn!("Source directory {:?} does not exist", source);
            return summary;
        }

        let destination = &self.options.destination;
        if !self.options.dry_run
            && let Err(e) = fs::create_dir_all(destination)
                .with_context(format!("Failed to create destination {:?}", destination))
        {
            error!("{}", e);
            return summary;
        }

        let exclude = nested_destination(source, destination);
        if let Some(ref excluded) = exclude {
            debug!("Destination is inside source; skipping {:?}", excluded);
        }

        let mut claimed = HashSet::new();
        for path in scanner::scan(source, exclude.as_deref()) {
            let outcome = self.process_file(&path, &mut claimed).await;
            summary.outcomes.push(outcome);
        }

        info!("Organize finished: {}", summary);
        summary
    }

    /// Run one file through the full state machine.
    ///
    /// `claimed` collects destinations handed out during a dry run so that
    /// later files see them as taken.
    pub async fn process_file(
        &self,
        source: &Path,
        claimed: &mut HashSet<PathBuf>,
    ) -> FileOutcome {
        let plan = match self.plan_file(source).await {
            Ok(plan) => plan,
            Err(e) => {
                warn!("Skipping unreadable file {:?}: {}", source, e);
                return FileOutcome::SkippedUnreadable {
                    source: source.to_path_buf(),
                    reason: e.to_string(),
                };
            }
        };

        if self.options.dry_run {
            return self.preview(plan, claimed);
        }

        self.apply(plan).await
    }

    /// Parse and resolve a file and compute its target. Only the catalog
    /// lookup has side effects.
    pub async fn plan_file(&self, source: &Path) -> std::result::Result<FilePlan, TagError> {
        let fields = self.codec.read(source)?.with_title_fallback(source);
        debug!(
            "Read {:?}: title={:?} artist={:?} album={:?}",
            source, fields.title, fields.artist, fields.album
        );

        let resolution = self.resolver.resolve(&fields).await;
        Ok(FilePlan::new(source, resolution, &self.options.destination))
    }

    fn preview(&self, plan: FilePlan, claimed: &mut HashSet<PathBuf>) -> FileOutcome {
        let album_dir = plan.target.album_dir.clone();
        let filename = if self.options.handle_duplicates {
            next_free_name(&plan.target.filename, |name| {
                let path = album_dir.join(name);
                path.exists() || claimed.contains(&path)
            })
        } else {
            plan.target.filename.clone()
        };

        let destination = plan.target.with_filename(filename).path();
        claimed.insert(destination.clone());
        debug!("Would move {:?} -> {:?}", plan.source, destination);

        FileOutcome::Planned {
            source: plan.source,
            destination,
            changes: plan.resolution.changes,
        }
    }

    async fn apply(&self, plan: FilePlan) -> FileOutcome {
        let FilePlan {
            source,
            resolution,
            target,
        } = plan;

        let tags = self.write_tags(&source, &resolution.changes);

        if let Err(e) = fs::create_dir_all(&target.album_dir)
            .with_context(format!("Failed to create directory {:?}", target.album_dir))
        {
            warn!("Skipping {:?}: {}", source, e);
            return FileOutcome::SkippedIoError {
                source,
                reason: e.to_string(),
            };
        }

        let target = if self.options.handle_duplicates {
            let filename = unique_filename(&target.album_dir, &target.filename);
            target.with_filename(filename)
        } else {
            target
        };
        let destination = target.path();

        if let Err(e) = move_file(&source, &destination) {
            warn!("Skipping {:?}: {}", source, e);
            return FileOutcome::SkippedIoError {
                source,
                reason: e.to_string(),
            };
        }
        debug!("Moved {:?} -> {:?}", source, destination);

        let artwork = self
            .embed_artwork(resolution.artwork_url.as_deref(), &destination)
            .await;

        FileOutcome::Moved {
            source,
            destination,
            lookup: resolution.lookup,
            tags,
            artwork,
        }
    }

    fn write_tags(&self, source: &Path, changes: &FieldChanges) -> TagWriteOutcome {
        if changes.is_empty() {
            return TagWriteOutcome::Unchanged;
        }

        match self.codec.write(source, changes) {
            Ok(()) => {
                debug!("Updated {:?} in {:?}", changes.field_names(), source);
                TagWriteOutcome::Written
            }
            Err(e) => {
                warn!("Tag update failed for {:?}: {}", source, e);
                TagWriteOutcome::Failed(e.to_string())
            }
        }
    }

    async fn embed_artwork(&self, url: Option<&str>, destination: &Path) -> ArtworkOutcome {
        let Some(url) = url else {
            return ArtworkOutcome::NotRequested;
        };

        if self.codec.has_artwork(destination) {
            return ArtworkOutcome::AlreadyPresent;
        }

        let image = match self.artwork.fetch(url).await {
            Ok(image) => image,
            Err(e) => {
                debug!("Artwork fetch failed for {}: {}", url, e);
                return ArtworkOutcome::Failed(Error::from(e).to_string());
            }
        };

        match self.codec.embed_cover(destination, &image) {
            Ok(()) => {
                debug!("Embedded {} byte cover in {:?}", image.len(), destination);
                ArtworkOutcome::Embedded
            }
            Err(e) => {
                debug!("Artwork embed failed for {:?}: {}", destination, e);
                ArtworkOutcome::Failed(Error::from(e).to_string())
            }
        }
    }
}

/// Move a file, falling back to copy + delete when rename fails (e.g.
/// across devices). Never overwrites an existing destination.
fn move_file(source: &Path, destination: &Path) -> Result<()> {
    if destination.exists() {
        return Err(Error::destination_exists(destination));
    }

    if let Err(rename_err) = fs::rename(source, destination) {
        debug!("rename failed ({}), trying copy", rename_err);
        copy_then_remove(source, destination, |from, to| fs::copy(from, to))?;
    }

    Ok(())
}

/// Copy `source` to `destination` and delete the source. On any failure the
/// destination is removed again, so exactly one complete file remains.
fn copy_then_remove<F>(source: &Path, destination: &Path, copy: F) -> Result<()>
where
    F: FnOnce(&Path, &Path) -> std::io::Result<u64>,
{
    if let Err(e) = copy(source, destination) {
        let _ = fs::remove_file(destination);
        return Err(Error::Io(e).context(format!("Failed to copy file to {:?}", destination)));
    }

    if let Err(e) = fs::remove_file(source) {
        let _ = fs::remove_file(destination);
        return Err(Error::Io(e).context(format!("Failed to remove source file {:?}", source)));
    }

    Ok(())
}

/// The destination expressed relative to `source`, when it lives inside the
/// source tree. The walk must not pick up files it has already placed.
fn nested_destination(source: &Path, destination: &Path) -> Option<PathBuf> {
    let source_abs = fs::canonicalize(source).ok()?;
    let destination_abs = fs::canonicalize(destination).ok()?;
    destination_abs
        .strip_prefix(&source_abs)
        .ok()
        .map(|relative| source.join(relative))
}
