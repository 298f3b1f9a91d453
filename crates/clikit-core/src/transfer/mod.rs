//! Export and import of configuration documents.
//!
//! Two text formats are supported, JSON and TOML.  Both hold the same flat
//! `key = value` map, so anything [`export`] writes, [`import`] reads back into
//! an identical document.
//!
//! ```toml
//! theme = "dark"
//! maxItems = 150
//! debug = true
//! ```
//!
//! Importing is a two-step process: [`parse_candidates`] turns the text into
//! an untyped candidate map, then [`import`] validates every candidate and
//! merges the survivors into a document.

pub mod export;
pub mod import;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use export::export;
pub use import::{import, parse_candidates, Candidates, ImportOutcome};

/// Text format of an export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Toml,
}

impl ExportFormat {
    /// Picks the format from a file extension: `.toml` is TOML, everything
    /// else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ExportFormat::Toml,
            _ => ExportFormat::Json,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Json => "json",
            ExportFormat::Toml => "toml",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "toml" => Ok(ExportFormat::Toml),
            other => Err(format!("unsupported format '{other}' (expected json or toml)")),
        }
    }
}

/// Which keys an export includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportScope {
    #[default]
    All,
    /// Only keys whose value differs from the schema default.
    ModifiedOnly,
}

/// How imported values are combined with existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Keys absent from the import revert to their defaults.
    #[default]
    Replace,
    /// Keys absent from the import keep their current value.
    Merge,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImportMode::Replace => "replace",
            ImportMode::Merge => "merge",
        })
    }
}
