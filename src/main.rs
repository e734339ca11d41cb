//! Music Organizer - sorts an MP3 collection into an
//! `{Artist}/{Genre}/{Album} ({Year})` tree.
//!
//! Missing genre and year are looked up in MusicBrainz and written back into
//! the files, and a cover thumbnail is embedded when a track has none.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod metadata;
pub mod organizer;
pub mod scanner;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("music_organizer=info".parse()?))
        .init();

    cli::run_command(&args)
}
