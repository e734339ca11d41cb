//! Adapter layer: Convert MusicBrainz DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use super::dto;
use crate::catalog::domain::CandidateRecord;

/// Convert a search response into candidates, preserving result order.
///
/// `cover_base_url` is the Cover Art Archive root used to build thumbnail
/// URLs from release-group IDs.
pub fn to_candidates(
    response: dto::ReleaseGroupSearchResponse,
    cover_base_url: &str,
) -> Vec<CandidateRecord> {
    response
        .release_groups
        .into_iter()
        .map(|rg| to_candidate(rg, cover_base_url))
        .collect()
}

fn to_candidate(rg: dto::ReleaseGroup, cover_base_url: &str) -> CandidateRecord {
    // Curated genres beat free-form tags when both exist
    let genre = rg
        .genres
        .first()
        .or_else(|| rg.tags.first())
        .map(|t| title_case(&t.name));

    CandidateRecord {
        genre,
        year: rg.first_release_date.as_deref().and_then(extract_year),
        artwork_url: Some(format!(
            "{}/release-group/{}/front-250",
            cover_base_url.trim_end_matches('/'),
            rg.id
        )),
    }
}

/// Year component of a MusicBrainz partial date.
fn extract_year(date: &str) -> Option<String> {
    let year = date.get(..4)?;
    year.chars()
        .all(|c| c.is_ascii_digit())
        .then(|| year.to_string())
}

/// MusicBrainz tags are lowercase ("classic rock"); tag values read better
/// capitalized.
fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
