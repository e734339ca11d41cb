//! Artwork HTTP client
//!
//! A single GET per URL with a fixed timeout. Any transport failure or
//! non-2xx status is an error; there are no retries.

use std::time::Duration;

use crate::catalog::domain::CatalogError;

/// Timeout for a whole artwork request
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Artwork download client
pub struct CoverArtFetcher {
    http_client: reqwest::Client,
}

impl CoverArtFetcher {
    /// Create a new client
    pub fn new() -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self { http_client })
    }

    /// Download the image at `url`
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NoMatches);
        }

        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        if let Some(content_type) = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            tracing::debug!("Artwork {} served as {}", url, content_type);
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?
            .to_vec();

        Ok(data)
    }
}
