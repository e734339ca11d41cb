//! MusicBrainz HTTP client
//!
//! Handles communication with the MusicBrainz web service.
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits to 1 req/sec.

use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

use super::{adapter, dto};
use crate::catalog::domain::{CandidateRecord, CatalogError};

/// User agent string - MusicBrainz requires this
const USER_AGENT: &str = concat!(
    "MusicOrganizer/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/music-organizer)"
);

/// Number of hits requested per search. Only the first is used.
const SEARCH_LIMIT: u32 = 5;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimum spacing between searches (MusicBrainz allows 1 req/sec)
pub const REQUEST_INTERVAL: Duration = Duration::from_millis(1100);

/// Public MusicBrainz web service root
pub const DEFAULT_BASE_URL: &str = "https://musicbrainz.org/ws/2";

/// Public Cover Art Archive root
pub const DEFAULT_COVER_BASE_URL: &str = "https://coverartarchive.org";

/// Characters with meaning in the Lucene query syntax MusicBrainz uses
const LUCENE_SPECIAL: &[char] = &[
    '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\',
    '/',
];

/// MusicBrainz release-group search client
pub struct MusicBrainzCatalog {
    http_client: reqwest::Client,
    base_url: String,
    cover_base_url: String,
    /// Earliest time the next search may be sent
    next_slot: Mutex<Option<Instant>>,
}

impl MusicBrainzCatalog {
    /// Create a client against custom endpoints (mirrors, tests)
    pub fn with_base_urls(
        base_url: impl Into<String>,
        cover_base_url: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            cover_base_url: cover_base_url.into(),
            next_slot: Mutex::new(None),
        })
    }

    /// Search album release groups for `query`, best match first.
    pub async fn search_albums(&self, query: &str) -> Result<Vec<CandidateRecord>, CatalogError> {
        self.wait_for_slot().await;
        let response = self.send_search_request(query).await?;
        Ok(adapter::to_candidates(response, &self.cover_base_url))
    }

    /// Claim the next request slot and sleep until it opens. The first
    /// search goes out immediately.
    async fn wait_for_slot(&self) {
        let slot = {
            let mut next = match self.next_slot.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let now = Instant::now();
            let slot = next.filter(|at| *at > now).unwrap_or(now);
            *next = Some(slot + REQUEST_INTERVAL);
            slot
        };

        if slot > Instant::now() {
            tracing::debug!("Waiting {:?} for MusicBrainz rate limit", slot - Instant::now());
            tokio::time::sleep_until(slot).await;
        }
    }

    fn search_url(&self, query: &str) -> String {
        let lucene = format!("({}) AND primarytype:album", escape_lucene(query));
        format!(
            "{}/release-group?query={}&fmt=json&limit={}",
            self.base_url,
            urlencoding::encode(&lucene),
            SEARCH_LIMIT
        )
    }

    /// Send the HTTP request and parse the response
    async fn send_search_request(
        &self,
        query: &str,
    ) -> Result<dto::ReleaseGroupSearchResponse, CatalogError> {
        let url = self.search_url(query);
        tracing::debug!("MusicBrainz search: {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NoMatches);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::SERVICE_UNAVAILABLE
        {
            return Err(CatalogError::RateLimited);
        }

        if !status.is_success() {
            // Try to parse error response
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(CatalogError::ApiError(error.error));
            }
            return Err(CatalogError::Status(status.as_u16()));
        }

        response
            .json::<dto::ReleaseGroupSearchResponse>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

/// Backslash-escape Lucene operators so sanitized names like
/// "Best Of (Remastered) [Live]" are searched as plain text.
fn escape_lucene(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if LUCENE_SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
