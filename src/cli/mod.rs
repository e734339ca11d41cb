//! Command-line interface for music-organizer.
//!
//! `organize` is the main command and also what runs when no subcommand is
//! given. `lookup` and `config` are small helpers for checking the catalog
//! and the settings file.

mod commands;

pub use commands::{Cli, Commands, OrganizeArgs, run_command};
