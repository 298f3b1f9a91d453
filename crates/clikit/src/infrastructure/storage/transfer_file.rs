//! Reading import files and writing export files.

use std::path::Path;

use crate::application::ports::StorageError;

/// Reads an import file as UTF-8 text.
///
/// # Errors
///
/// Returns [`StorageError::Read`] if the file cannot be read.
pub fn read_text(path: &Path) -> Result<String, StorageError> {
    std::fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes fully-rendered export text, replacing any existing file.
///
/// # Errors
///
/// Returns [`StorageError::Write`] if the file cannot be written.
pub fn write_text(path: &Path, text: &str) -> Result<(), StorageError> {
    std::fs::write(path, text).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })
}
