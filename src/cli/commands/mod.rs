//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `organize`: Move MP3s into the Artist/Genre/Album tree
//! - `lookup`: Run a single catalog query
//! - `config`: Show or initialize the config file

mod config;
mod lookup;
mod organize;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::{Builder, Runtime};

pub use config::cmd_config;
pub use lookup::cmd_lookup;
pub use organize::cmd_organize;

/// Music Organizer CLI
///
/// Without a subcommand, the organize flags apply directly.
#[derive(Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub organize: OrganizeArgs,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Organize MP3 files into {Artist}/{Genre}/{Album} ({Year})/
    Organize(OrganizeArgs),
    /// Query the catalog for one album and print the first match
    Lookup {
        /// Artist name
        artist: String,
        /// Album title
        album: String,
    },
    /// Show the config file location and current values
    Config {
        /// Write a config file with default values
        #[arg(long)]
        init: bool,
    },
}

/// Flags for the organize command
#[derive(Args, Debug, Clone, Default)]
pub struct OrganizeArgs {
    /// Directory to scan for MP3 files
    #[arg(short, long, env = "MUSIC_ORGANIZER_SOURCE")]
    pub source: Option<PathBuf>,
    /// Destination root directory
    #[arg(short, long, env = "MUSIC_ORGANIZER_DEST")]
    pub destination: Option<PathBuf>,
    /// Dry run - show what would be done without actually moving files
    #[arg(long)]
    pub dry_run: bool,
    /// Leave a file in place instead of renaming it when the target exists
    #[arg(long)]
    pub no_duplicates_rename: bool,
    /// Skip catalog lookups and artwork downloads
    #[arg(long)]
    pub offline: bool,
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = runtime()?;

    match &cli.command {
        Some(Commands::Organize(args)) => cmd_organize(&rt, args),
        None => cmd_organize(&rt, &cli.organize),
        Some(Commands::Lookup { artist, album }) => cmd_lookup(&rt, artist, album),
        Some(Commands::Config { init }) => cmd_config(*init),
    }
}

/// Single-threaded runtime; every file is handled in turn.
fn runtime() -> anyhow::Result<Runtime> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}
