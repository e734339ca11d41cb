//! MusicBrainz API Data Transfer Objects
//!
//! These types match EXACTLY what the MusicBrainz API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the musicbrainz module - convert to domain types.
//!
//! API Reference: https://musicbrainz.org/doc/MusicBrainz_API/Search#Release_Group

use serde::{Deserialize, Serialize};

/// Release-group search response
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseGroupSearchResponse {
    /// Total number of hits
    pub count: Option<u32>,
    /// Offset of this page
    pub offset: Option<u32>,
    /// Hits, best score first
    #[serde(default)]
    pub release_groups: Vec<ReleaseGroup>,
}

/// Release group (e.g., "Abbey Road" across all editions)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseGroup {
    /// MusicBrainz release group ID
    pub id: String,
    /// Search relevance (0-100)
    pub score: Option<u32>,
    /// Title
    pub title: String,
    /// Primary type (Album, Single, EP, etc.)
    pub primary_type: Option<String>,
    /// First release date (YYYY, YYYY-MM, or YYYY-MM-DD)
    pub first_release_date: Option<String>,
    /// Artist credits
    #[serde(default)]
    pub artist_credit: Vec<ArtistCredit>,
    /// Curated genres (not always present in search results)
    #[serde(default)]
    pub genres: Vec<Tag>,
    /// Folksonomy tags
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Artist credit (can be multiple for collaborations)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistCredit {
    /// How this artist is credited (may differ from official name)
    pub name: Option<String>,
    /// Join phrase (e.g., " & ", " feat. ")
    pub joinphrase: Option<String>,
    /// The artist
    pub artist: Artist,
}

/// Artist info
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    /// MusicBrainz artist ID
    pub id: String,
    /// Official artist name
    pub name: String,
}

/// Tag or genre with its vote count
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tag {
    pub count: Option<i32>,
    pub name: String,
}

/// Error response body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: String,
    pub help: Option<String>,
}

#[cfg(test)]
mod contract_tests {
    use super::*;

    /// Trimmed copy of a real search response
    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "created": "2024-04-27T10:00:00.000Z",
            "count": 2,
            "offset": 0,
            "release-groups": [
                {
                    "id": "rg-queen-gh",
                    "type-id": "f529b476-6e62-324f-b0aa-1f3e33d313fc",
                    "score": 100,
                    "primary-type-id": "f529b476-6e62-324f-b0aa-1f3e33d313fc",
                    "count": 44,
                    "title": "Greatest Hits",
                    "first-release-date": "1981-10-26",
                    "primary-type": "Album",
                    "secondary-types": ["Compilation"],
                    "artist-credit": [
                        {"name": "Queen", "artist": {"id": "queen-id", "name": "Queen", "sort-name": "Queen"}}
                    ],
                    "tags": [
                        {"count": 3, "name": "rock"},
                        {"count": 1, "name": "classic rock"}
                    ]
                },
                {
                    "id": "rg-other",
                    "score": 71,
                    "title": "Greatest Hits II",
                    "primary-type": "Album"
                }
            ]
        }"#;

        let response: ReleaseGroupSearchResponse =
            serde_json::from_str(json).expect("Should parse search response");

        assert_eq!(response.count, Some(2));
        assert_eq!(response.release_groups.len(), 2);

        let first = &response.release_groups[0];
        assert_eq!(first.title, "Greatest Hits");
        assert_eq!(first.first_release_date.as_deref(), Some("1981-10-26"));
        assert_eq!(first.primary_type.as_deref(), Some("Album"));
        assert_eq!(first.artist_credit[0].artist.name, "Queen");
        assert_eq!(first.tags[0].name, "rock");
        assert!(first.genres.is_empty());

        let second = &response.release_groups[1];
        assert!(second.first_release_date.is_none());
        assert!(second.tags.is_empty());
    }

    #[test]
    fn test_parse_empty_search_response() {
        let json = r#"{"created": "2024-04-27T10:00:00.000Z", "count": 0, "offset": 0, "release-groups": []}"#;
        let response: ReleaseGroupSearchResponse =
            serde_json::from_str(json).expect("Should parse empty response");
        assert!(response.release_groups.is_empty());
    }

    #[test]
    fn test_parse_error_response() {
        let json = r#"{
            "error": "Invalid query",
            "help": "For usage, please see: https://musicbrainz.org/development/mmd"
        }"#;

        let error: ApiError = serde_json::from_str(json).expect("Should parse error");
        assert_eq!(error.error, "Invalid query");
        assert!(error.help.is_some());
    }
}
