//! MusicBrainz API integration
//!
//! Album lookups use the release-group search endpoint restricted to
//! primary type `Album`. Cover thumbnails come from the Cover Art Archive,
//! which is keyed by the same release-group IDs.
//!
//! API docs: https://musicbrainz.org/doc/MusicBrainz_API/Search

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_candidates;
pub use client::{DEFAULT_BASE_URL, DEFAULT_COVER_BASE_URL, MusicBrainzCatalog};
