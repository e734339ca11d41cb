//! Cover artwork download
//!
//! Fetches the image behind a catalog thumbnail URL. The organizer embeds the
//! bytes verbatim; nothing here inspects the image format.

mod client;

pub use client::{CoverArtFetcher, FETCH_TIMEOUT};
