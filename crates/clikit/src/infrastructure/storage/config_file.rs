//! JSON-based configuration persistence.
//!
//! Reads and writes the configuration document to the platform-appropriate
//! config file:
//! - Windows:  `%APPDATA%\clikit\config.json`
//! - Linux:    `~/.config/clikit/config.json` (or `$XDG_CONFIG_HOME/clikit`)
//! - macOS:    `~/Library/Application Support/clikit/config.json`
//!
//! The file is a flat, pretty-printed JSON object:
//!
//! ```json
//! {
//!   "theme": "dark",
//!   "colorOutput": true,
//!   "maxItems": 150
//! }
//! ```
//!
//! Every save writes all schema keys.  Older files missing newer keys still
//! load: absent keys take their defaults when the document is built.

use std::path::{Path, PathBuf};

use clikit_core::transfer::Candidates;
use clikit_core::ConfigDocument;
use tracing::debug;

use crate::application::ports::{ConfigRepository, StorageError};

/// File name of the stored document inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// [`ConfigRepository`] backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository at the platform default location.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoPlatformConfigDir`] when the platform config
    /// base directory cannot be determined from the environment.
    pub fn at_default_location() -> Result<Self, StorageError> {
        Ok(Self::new(config_file_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigRepository for JsonFileRepository {
    fn read(&self) -> Result<Option<Candidates>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let stored = serde_json::from_str(&content).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!("loaded config from {}", self.path.display());
        Ok(Some(stored))
    }

    fn write(&self, document: &ConfigDocument) -> Result<(), StorageError> {
        // Ensure directory exists before writing.
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| StorageError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let mut content =
            serde_json::to_string_pretty(document).map_err(StorageError::Serialize)?;
        content.push('\n');
        std::fs::write(&self.path, content).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("saved config to {}", self.path.display());
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`StorageError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, StorageError> {
    platform_config_dir().ok_or(StorageError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`StorageError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, StorageError> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("clikit"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("clikit"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("clikit")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
