//! Internal domain models for catalog lookups.
//!
//! These types are OUR types - they don't change when external APIs change.
//! All external API responses get converted into these types via adapters.

/// Album metadata offered by the catalog for a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRecord {
    /// First category/genre name reported for the release
    pub genre: Option<String>,
    /// Release year as the catalog reports it
    pub year: Option<String>,
    /// Thumbnail URL for the album cover
    pub artwork_url: Option<String>,
}

/// Result of asking the catalog about one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// No field was missing, so the catalog was not consulted
    NotNeeded,
    /// First result of the query
    Found(CandidateRecord),
    /// The query ran but produced no results
    NotFound,
    /// The query failed; treated exactly like `NotFound`
    Error(String),
}

impl LookupOutcome {
    /// The candidate, if the lookup produced one.
    pub fn candidate(&self) -> Option<&CandidateRecord> {
        match self {
            LookupOutcome::Found(record) => Some(record),
            _ => None,
        }
    }

    /// Collapse a client result into an outcome. Only the first result
    /// counts; there is no ranking.
    pub fn from_results(result: Result<Vec<CandidateRecord>, CatalogError>) -> Self {
        match result {
            Ok(results) => match results.into_iter().next() {
                Some(first) => LookupOutcome::Found(first),
                None => LookupOutcome::NotFound,
            },
            Err(CatalogError::NoMatches) => LookupOutcome::NotFound,
            Err(e) => LookupOutcome::Error(e.to_string()),
        }
    }
}

/// Errors that can occur talking to the catalog or downloading artwork
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("No matches found")]
    NoMatches,

    #[error("Rate limited - try again later")]
    RateLimited,
}
