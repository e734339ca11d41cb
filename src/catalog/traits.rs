//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use music_organizer::catalog::traits::CatalogApi;
//!
//! async fn first_genre(catalog: &dyn CatalogApi) -> Option<String> {
//!     let results = catalog.search_albums("Queen Greatest Hits").await.ok()?;
//!     results.into_iter().next()?.genre
//! }
//! ```

use async_trait::async_trait;

use super::domain::{CandidateRecord, CatalogError};

/// Album search against a metadata catalog.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Search album-type releases for a free-text query, best match first.
    async fn search_albums(&self, query: &str) -> Result<Vec<CandidateRecord>, CatalogError>;
}

/// Download of a cover image by URL.
#[async_trait]
pub trait ArtworkApi: Send + Sync {
    /// Fetch the raw bytes behind `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, CatalogError>;
}

/// Catalog that never finds anything. Used for `--offline` runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineCatalog;

#[async_trait]
impl CatalogApi for OfflineCatalog {
    async fn search_albums(&self, _query: &str) -> Result<Vec<CandidateRecord>, CatalogError> {
        Ok(Vec::new())
    }
}

// Implement traits for real clients

#[async_trait]
impl CatalogApi for super::musicbrainz::MusicBrainzCatalog {
    async fn search_albums(&self, query: &str) -> Result<Vec<CandidateRecord>, CatalogError> {
        self.search_albums(query).await
    }
}

#[async_trait]
impl ArtworkApi for super::coverart::CoverArtFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.fetch(url).await
    }
}
