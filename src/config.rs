//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\music-organizer\config.toml
//! - macOS: ~/Library/Application Support/music-organizer/config.toml
//! - Linux: ~/.config/music-organizer/config.toml
//!
//! Command-line flags override whatever is loaded here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::musicbrainz;

/// Source directory used when nothing else is configured
pub const DEFAULT_SOURCE: &str = "/music";

/// Destination root used when nothing else is configured
pub const DEFAULT_DESTINATION: &str = "/music/organized";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where to read from and write to
    pub paths: PathsConfig,

    /// Move behaviour
    pub organize: OrganizeConfig,

    /// Online metadata lookups
    pub catalog: CatalogConfig,
}

/// Source and destination directories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            destination: PathBuf::from(DEFAULT_DESTINATION),
        }
    }
}

/// Organize settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizeConfig {
    /// Rename colliding files to `name (N).ext`; when false a collision
    /// leaves the source file in place
    pub handle_duplicates: bool,
}

impl Default for OrganizeConfig {
    fn default() -> Self {
        Self {
            handle_duplicates: true,
        }
    }
}

/// Catalog settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// When false no lookups are made
    pub enabled: bool,

    /// MusicBrainz web service root
    pub musicbrainz_url: String,

    /// Cover Art Archive root used for thumbnail URLs
    pub cover_art_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            musicbrainz_url: musicbrainz::DEFAULT_BASE_URL.to_string(),
            cover_art_url: musicbrainz::DEFAULT_COVER_BASE_URL.to_string(),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("music-organizer"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    load_from(&path)
}

/// Load configuration from a specific file, with the same fallbacks as [`load`].
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to a specific file
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[organize]"));
        assert!(toml.contains("[catalog]"));
        assert!(toml.contains("/music/organized"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.paths.source, PathBuf::from("/music"));
        assert_eq!(config.paths.destination, PathBuf::from("/music/organized"));
        assert!(config.organize.handle_duplicates);
        assert!(config.catalog.enabled);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        // Config with only some fields
        let toml = r#"
[paths]
source = "/srv/incoming"

[catalog]
enabled = false
"#;
        let config: Config = toml::from_str(toml).unwrap();

        // Specified fields are set
        assert_eq!(config.paths.source, PathBuf::from("/srv/incoming"));
        assert!(!config.catalog.enabled);

        // Other fields use defaults
        assert_eq!(config.paths.destination, PathBuf::from(DEFAULT_DESTINATION));
        assert!(config.organize.handle_duplicates);
        assert_eq!(config.catalog.musicbrainz_url, "https://musicbrainz.org/ws/2");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.paths.destination = PathBuf::from("/tmp/sorted");
        config.organize.handle_duplicates = false;

        save_to(&config, &path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());
        assert_eq!(load_from(&path), config);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is [not toml").unwrap();

        assert_eq!(load_from(&path), Config::default());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(load_from(&dir.path().join("absent.toml")), Config::default());
    }
}
