//! Metadata resolution: decide what is missing, ask the catalog, merge.
//!
//! The merge is pure ([`merge`]); only [`MetadataResolver::resolve`] talks to
//! the catalog. A field is filled only when it is missing on the track AND
//! the candidate supplies a value. Present fields are never replaced.

use tracing::{debug, warn};

use super::sanitize::{first_artist, sanitize};
use crate::catalog::{CatalogApi, LookupOutcome};
use crate::metadata::{
    DEFAULT_ALBUM, DEFAULT_ARTIST, DEFAULT_GENRE, DEFAULT_YEAR, FieldChanges, TrackFields,
};

/// Fields used for placement. Artist and album are already sanitized;
/// genre and year are raw tag values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMetadata {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
}

impl ResolvedMetadata {
    /// Reduce a track's tags to placement fields.
    ///
    /// Multi-artist credits keep their first name. A value that sanitizes to
    /// nothing counts as missing.
    pub fn from_track(track: &TrackFields) -> Self {
        let clean = |value: &str| Some(sanitize(value)).filter(|s| !s.is_empty());

        Self {
            artist: track.artist.as_deref().and_then(|a| clean(first_artist(a))),
            album: track.album.as_deref().and_then(clean),
            genre: track.genre.clone(),
            year: track.year.clone(),
        }
    }

    pub fn artist_or_default(&self) -> &str {
        self.artist.as_deref().unwrap_or(DEFAULT_ARTIST)
    }

    pub fn album_or_default(&self) -> &str {
        self.album.as_deref().unwrap_or(DEFAULT_ALBUM)
    }

    pub fn genre_or_default(&self) -> &str {
        self.genre.as_deref().unwrap_or(DEFAULT_GENRE)
    }

    pub fn year_or_default(&self) -> &str {
        self.year.as_deref().unwrap_or(DEFAULT_YEAR)
    }

    /// True when any placement field is missing.
    pub fn needs_lookup(&self) -> bool {
        self.artist.is_none() || self.album.is_none() || self.genre.is_none() || self.year.is_none()
    }

    /// Free-text catalog query. Missing fields are sent as their
    /// placeholder text.
    pub fn catalog_query(&self) -> String {
        format!("{} {}", self.artist_or_default(), self.album_or_default())
    }
}

/// Outcome of resolving one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Placement fields after merging
    pub metadata: ResolvedMetadata,
    /// Fields that were filled from the catalog and must be written back
    pub changes: FieldChanges,
    /// Cover thumbnail offered by the catalog
    pub artwork_url: Option<String>,
    /// What the catalog said
    pub lookup: LookupOutcome,
}

/// Merge a lookup outcome into the track's placement fields.
pub fn merge(mut metadata: ResolvedMetadata, lookup: LookupOutcome) -> Resolution {
    let mut changes = FieldChanges::default();
    let mut artwork_url = None;

    if let Some(candidate) = lookup.candidate() {
        if metadata.genre.is_none() {
            changes.genre = candidate.genre.clone();
        }
        if metadata.year.is_none() {
            changes.year = candidate.year.clone();
        }
        artwork_url = candidate.artwork_url.clone();
    }

    if let Some(genre) = &changes.genre {
        metadata.genre = Some(genre.clone());
    }
    if let Some(year) = &changes.year {
        metadata.year = Some(year.clone());
    }

    Resolution {
        metadata,
        changes,
        artwork_url,
        lookup,
    }
}

/// Resolves tracks against a catalog.
pub struct MetadataResolver<'a> {
    catalog: &'a dyn CatalogApi,
}

impl<'a> MetadataResolver<'a> {
    pub fn new(catalog: &'a dyn CatalogApi) -> Self {
        Self { catalog }
    }

    /// Query the catalog only if something is missing, then merge.
    pub async fn resolve(&self, track: &TrackFields) -> Resolution {
        let metadata = ResolvedMetadata::from_track(track);

        let lookup = if metadata.needs_lookup() {
            let query = metadata.catalog_query();
            let outcome = LookupOutcome::from_results(self.catalog.search_albums(&query).await);
            match &outcome {
                LookupOutcome::Found(candidate) => debug!("Catalog match for {:?}: {:?}", query, candidate),
                LookupOutcome::NotFound => debug!("No catalog match for {:?}", query),
                LookupOutcome::Error(reason) => warn!("Catalog lookup for {:?} failed: {}", query, reason),
                LookupOutcome::NotNeeded => {}
            }
            outcome
        } else {
            LookupOutcome::NotNeeded
        };

        merge(metadata, lookup)
    }
}
