//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors ([`TagError`], [`CatalogError`]) for detailed
//!   handling; `config::ConfigError` goes straight to `anyhow` in the CLI
//! - The organizer turns every [`Error`] into a per-file outcome; nothing
//!   here aborts a run
//!
//! # Example
//!
//! ```ignore
//! use music_organizer::error::{Result, ResultExt};
//!
//! fn prepare(dir: &Path) -> Result<()> {
//!     std::fs::create_dir_all(dir).with_context(format!("creating {:?}", dir))?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use crate::catalog::CatalogError;
use crate::metadata::TagError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tag container error
    #[error("Tag error: {0}")]
    Tag(#[from] TagError),

    /// Catalog or artwork service error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Refused to overwrite an existing destination file
    #[error("Destination already exists: {0}")]
    DestinationExists(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a destination-exists error.
    pub fn destination_exists(path: impl Into<PathBuf>) -> Self {
        Self::DestinationExists(path.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}
