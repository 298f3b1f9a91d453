//! Storage infrastructure: configuration file persistence.
//!
//! - `config_file` reads and writes the stored document and resolves its
//!   platform-appropriate location.
//! - `transfer_file` reads import files and writes export files.
//!
//! Keeping storage concerns here means the file format can change without
//! touching the application layer.

pub mod config_file;
pub mod transfer_file;

pub use config_file::JsonFileRepository;
