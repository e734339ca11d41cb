//! Catalog lookups - fills in missing album metadata from external services.
//!
//! # Architecture
//!
//! Mirrors the usual split between wire shapes and our own types:
//! - **Domain models** (`domain.rs`) - [`CandidateRecord`], [`LookupOutcome`]
//! - **API DTOs** (`musicbrainz/dto.rs`) - exact response shapes
//! - **Adapters** - convert DTOs to domain models
//! - **Clients** - HTTP clients for the catalog and for artwork downloads
//! - **Traits** (`traits.rs`) - seams the organizer depends on, so tests can
//!   substitute fakes
//!
//! Everything here is async (reqwest) but the organizer awaits each call in
//! turn on a single-threaded runtime.

pub mod coverart;
pub mod domain;
pub mod musicbrainz;
pub mod traits;

pub use coverart::CoverArtFetcher;
pub use domain::{CandidateRecord, CatalogError, LookupOutcome};
pub use musicbrainz::MusicBrainzCatalog;
pub use traits::{ArtworkApi, CatalogApi, OfflineCatalog};
