//! Rendering a document as export text.

use serde::ser::{Serialize, Serializer};

use crate::document::ConfigDocument;
use crate::error::TransferError;
use crate::schema::ConfigValue;
use crate::transfer::{ExportFormat, ExportScope};

/// Flat view over the selected entries, serialised as one map.
struct Selection<'a>(Vec<(&'static str, &'a ConfigValue)>);

impl Serialize for Selection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (*k, *v)))
    }
}

/// Renders the keys selected by `scope` in `format`.
///
/// The full text is produced in memory; nothing is written unless every
/// selected key serialised.
///
/// # Errors
///
/// Returns [`TransferError`] if serialisation fails.
pub fn export(
    doc: &ConfigDocument,
    scope: ExportScope,
    format: ExportFormat,
) -> Result<String, TransferError> {
    let selection = Selection(
        doc.entries()
            .filter(|(setting, _)| match scope {
                ExportScope::All => true,
                ExportScope::ModifiedOnly => doc.is_modified(setting.key),
            })
            .map(|(setting, value)| (setting.key, value))
            .collect(),
    );

    let mut text = match format {
        ExportFormat::Json => serde_json::to_string_pretty(&selection)?,
        ExportFormat::Toml => toml::to_string_pretty(&selection)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}
