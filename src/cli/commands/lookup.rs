//! Single catalog query, for checking what a lookup would return.

use tokio::runtime::Runtime;

use crate::catalog::{LookupOutcome, MusicBrainzCatalog};
use crate::config;
use crate::metadata::TrackFields;
use crate::organizer::ResolvedMetadata;

/// Query the catalog the way the organizer would and print the first match
pub fn cmd_lookup(rt: &Runtime, artist: &str, album: &str) -> anyhow::Result<()> {
    let config = config::load();
    let catalog = MusicBrainzCatalog::with_base_urls(
        config.catalog.musicbrainz_url,
        config.catalog.cover_art_url,
    )?;

    let track = TrackFields {
        artist: Some(artist.to_string()),
        album: Some(album.to_string()),
        ..Default::default()
    };
    let query = ResolvedMetadata::from_track(&track).catalog_query();
    println!("Query: {}", query);

    let outcome = LookupOutcome::from_results(rt.block_on(catalog.search_albums(&query)));
    match outcome {
        LookupOutcome::Found(candidate) => {
            println!("Genre:   {}", candidate.genre.as_deref().unwrap_or("-"));
            println!("Year:    {}", candidate.year.as_deref().unwrap_or("-"));
            println!("Artwork: {}", candidate.artwork_url.as_deref().unwrap_or("-"));
        }
        LookupOutcome::NotFound | LookupOutcome::NotNeeded => println!("No match"),
        LookupOutcome::Error(reason) => anyhow::bail!("Lookup failed: {}", reason),
    }

    Ok(())
}
