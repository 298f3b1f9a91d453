//! Abstractions the application layer depends on.
//!
//! The infrastructure layer implements these traits against the real file
//! system and terminal; tests substitute `mockall` mocks.

use std::io;
use std::path::PathBuf;

use clikit_core::transfer::Candidates;
use clikit_core::ConfigDocument;
use thiserror::Error;

/// Error type for configuration persistence.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// The stored file exists but could not be read.
    #[error("I/O error reading config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The stored file is not a JSON object.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document could not be written.
    #[error("I/O error writing config at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document could not be serialised.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Persistent storage for the configuration document.
///
/// Storage is whole-file: `read` returns everything that was stored, `write`
/// overwrites it.  No locking is performed.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigRepository {
    /// Reads the stored key/value pairs.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] or [`StorageError::Parse`] when stored
    /// data exists but is unusable.
    fn read(&self) -> Result<Option<Candidates>, StorageError>;

    /// Overwrites the stored document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] or [`StorageError::Serialize`].
    fn write(&self, document: &ConfigDocument) -> Result<(), StorageError>;

    /// Where the document lives, for display.
    fn location(&self) -> PathBuf;
}

/// Yes/no gate in front of destructive operations.
#[cfg_attr(test, mockall::automock)]
pub trait Confirmation {
    /// Asks `prompt` and returns whether the user agreed.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the answer could not be read.
    fn confirm(&self, prompt: &str) -> io::Result<bool>;
}
