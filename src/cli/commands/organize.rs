//! File organization command.

use tokio::runtime::Runtime;

use super::OrganizeArgs;
use crate::catalog::{CatalogApi, CoverArtFetcher, MusicBrainzCatalog, OfflineCatalog};
use crate::config::{self, Config};
use crate::metadata::LoftyCodec;
use crate::organizer::{FileOutcome, OrganizeOptions, Organizer};

/// Organize music files based on metadata
pub fn cmd_organize(rt: &Runtime, args: &OrganizeArgs) -> anyhow::Result<()> {
    let config = config::load();
    let source = args
        .source
        .clone()
        .unwrap_or_else(|| config.paths.source.clone());
    let options = organize_options(args, &config);

    let catalog: Box<dyn CatalogApi> = if args.offline || !config.catalog.enabled {
        Box::new(OfflineCatalog)
    } else {
        Box::new(MusicBrainzCatalog::with_base_urls(
            config.catalog.musicbrainz_url.clone(),
            config.catalog.cover_art_url.clone(),
        )?)
    };
    let artwork = CoverArtFetcher::new()?;
    let codec = LoftyCodec::new();

    println!("Source: {:?}", source);
    println!("Destination: {:?}", options.destination);
    if options.dry_run {
        println!("\n[DRY RUN MODE - No files will be moved]\n");
    }

    let organizer = Organizer::new(&codec, catalog.as_ref(), &artwork, options);
    let summary = rt.block_on(organizer.run(&source));

    for outcome in &summary.outcomes {
        match outcome {
            FileOutcome::Moved {
                source,
                destination,
                ..
            } => println!("MOVED: {:?} -> {:?}", source, destination),
            FileOutcome::Planned {
                source,
                destination,
                ..
            } => println!("WOULD MOVE: {:?} -> {:?}", source, destination),
            FileOutcome::SkippedUnreadable { source, reason } => {
                eprintln!("SKIPPED (unreadable) {:?}: {}", source, reason)
            }
            FileOutcome::SkippedIoError { source, reason } => {
                eprintln!("SKIPPED (I/O error) {:?}: {}", source, reason)
            }
        }
    }

    println!("\nCompleted: {}", summary);
    Ok(())
}

/// Merge command-line flags over the config file.
fn organize_options(args: &OrganizeArgs, config: &Config) -> OrganizeOptions {
    OrganizeOptions {
        destination: args
            .destination
            .clone()
            .unwrap_or_else(|| config.paths.destination.clone()),
        handle_duplicates: config.organize.handle_duplicates && !args.no_duplicates_rename,
        dry_run: args.dry_run,
    }
}
