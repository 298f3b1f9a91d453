//! Parsing and applying import files.

use serde_json::{Map, Value};
use tracing::debug;

use crate::document::ConfigDocument;
use crate::error::{ConfigError, TransferError, ValidationError};
use crate::schema;
use crate::transfer::{ExportFormat, ImportMode};
use crate::validate;

/// Untyped key/value pairs read from an import file.
pub type Candidates = Map<String, Value>;

/// Result of an accepted import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub document: ConfigDocument,
    /// Keys written into `document`, in schema order.
    pub applied: Vec<&'static str>,
    /// Validation errors found; non-empty only for a forced import.
    pub errors: Vec<ValidationError>,
}

/// Parses import text into a flat candidate map.
///
/// # Errors
///
/// Returns [`TransferError`] if the text is not a valid object/table in
/// `format`.
pub fn parse_candidates(text: &str, format: ExportFormat) -> Result<Candidates, TransferError> {
    let candidates: Candidates = match format {
        ExportFormat::Json => serde_json::from_str(text)?,
        ExportFormat::Toml => toml::from_str(text)?,
    };
    Ok(candidates)
}

/// Validates every candidate and combines them with a base document.
///
/// All candidates are validated before anything is applied, so the returned
/// error list is complete.  The base is the defaults for
/// [`ImportMode::Replace`] and `current` for [`ImportMode::Merge`].
///
/// With `force`, entries for known keys are applied even if they failed
/// validation; unknown keys and `null` values are never applied.
///
/// # Errors
///
/// Returns [`ConfigError::ImportRejected`] with every validation error when
/// any candidate is invalid and `force` is false.  `current` is untouched.
pub fn import(
    current: &ConfigDocument,
    candidates: &Candidates,
    mode: ImportMode,
    force: bool,
) -> Result<ImportOutcome, ConfigError> {
    let mut errors = Vec::new();
    let mut accepted = Vec::with_capacity(candidates.len());

    for (key, raw) in candidates {
        match validate::validate(key, raw) {
            Ok(value) => accepted.push((key.as_str(), value)),
            Err(e) => {
                if force && !raw.is_null() {
                    if let Ok(value) = validate::coerce_unchecked(key, raw) {
                        accepted.push((key.as_str(), value));
                    }
                }
                errors.push(e);
            }
        }
    }

    if !errors.is_empty() && !force {
        debug!("import rejected with {} validation errors", errors.len());
        return Err(ConfigError::ImportRejected(errors));
    }

    let mut document = match mode {
        ImportMode::Replace => ConfigDocument::defaults(),
        ImportMode::Merge => current.clone(),
    };
    let mut positions = Vec::with_capacity(accepted.len());
    for (key, value) in accepted {
        // Keys in `accepted` passed validate or coerce_unchecked, so they are declared.
        if let Some(idx) = schema::position(key) {
            document.assign(idx, value);
            positions.push(idx);
        }
    }
    positions.sort_unstable();
    let applied = positions.into_iter().map(|idx| schema::SCHEMA[idx].key).collect();

    Ok(ImportOutcome {
        document,
        applied,
        errors,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationReason;
    use crate::schema::{ConfigValue, SCHEMA};
    use crate::transfer::{export, ExportScope};
    use serde_json::json;

    fn candidates(value: Value) -> Candidates {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn customised() -> ConfigDocument {
        let (doc, _) = ConfigDocument::defaults()
            .set("theme", &json!("rainbow"), false)
            .unwrap();
        let (doc, _) = doc.set("maxItems", &json!(42), false).unwrap();
        let (doc, _) = doc.set("debug", &json!(true), false).unwrap();
        doc
    }

    // ── Round trip ────────────────────────────────────────────────────────────

    #[test]
    fn test_export_all_then_replace_import_round_trips_json() {
        // Arrange
        let original = customised();
        let text = export(&original, ExportScope::All, ExportFormat::Json).unwrap();

        // Act
        let parsed = parse_candidates(&text, ExportFormat::Json).unwrap();
        let outcome = import(&ConfigDocument::defaults(), &parsed, ImportMode::Replace, false)
            .unwrap();

        // Assert
        assert_eq!(outcome.document, original);
        assert_eq!(outcome.applied.len(), SCHEMA.len());
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_export_all_then_replace_import_round_trips_toml() {
        let original = customised();
        let text = export(&original, ExportScope::All, ExportFormat::Toml).unwrap();

        let parsed = parse_candidates(&text, ExportFormat::Toml).unwrap();
        let outcome = import(&ConfigDocument::defaults(), &parsed, ImportMode::Replace, false)
            .unwrap();

        assert_eq!(outcome.document, original);
    }

    // ── Merge vs replace ──────────────────────────────────────────────────────

    #[test]
    fn test_merge_keeps_current_values_for_absent_keys() {
        // Arrange
        let current = customised();
        let incoming = candidates(json!({ "language": "ja" }));

        // Act
        let outcome = import(&current, &incoming, ImportMode::Merge, false).unwrap();

        // Assert
        for (setting, value) in outcome.document.entries() {
            let expected = match incoming.get(setting.key) {
                Some(raw) => validate::validate(setting.key, raw).unwrap(),
                None => current.get(setting.key).unwrap().clone(),
            };
            assert_eq!(value, &expected, "key {}", setting.key);
        }
        assert_eq!(outcome.applied, vec!["language"]);
    }

    #[test]
    fn test_replace_reverts_absent_keys_to_defaults() {
        let current = customised();
        let incoming = candidates(json!({ "language": "ja" }));

        let outcome = import(&current, &incoming, ImportMode::Replace, false).unwrap();

        for (setting, value) in outcome.document.entries() {
            let expected = match incoming.get(setting.key) {
                Some(raw) => validate::validate(setting.key, raw).unwrap(),
                None => setting.default_value(),
            };
            assert_eq!(value, &expected, "key {}", setting.key);
        }
    }

    // ── Validation ────────────────────────────────────────────────────────────

    #[test]
    fn test_invalid_entry_aborts_unforced_merge() {
        // Arrange
        let current = ConfigDocument::defaults();
        let incoming = candidates(json!({ "theme": "dark", "colorOutput": "notabool" }));

        // Act
        let err = import(&current, &incoming, ImportMode::Merge, false).unwrap_err();

        // Assert
        let errors = err.validation_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].key, "colorOutput");
        assert_eq!(errors[0].reason, ValidationReason::WrongType);
    }

    #[test]
    fn test_all_errors_are_collected() {
        let incoming = candidates(json!({
            "theme": "neon",
            "maxItems": 0,
            "fontSize": 12,
            "language": "en"
        }));

        let err = import(&ConfigDocument::defaults(), &incoming, ImportMode::Merge, false)
            .unwrap_err();

        let mut keys: Vec<_> = err.validation_errors().iter().map(|e| e.key.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["fontSize", "maxItems", "theme"]);
    }

    #[test]
    fn test_forced_import_applies_known_keys_and_reports_errors() {
        let incoming = candidates(json!({
            "theme": "neon",
            "fontSize": 12,
            "language": "fr"
        }));

        let outcome =
            import(&ConfigDocument::defaults(), &incoming, ImportMode::Merge, true).unwrap();

        assert_eq!(outcome.applied, vec!["theme", "language"]);
        assert_eq!(outcome.errors.len(), 2);
        assert_eq!(outcome.document.get("theme").unwrap(), &ConfigValue::from("neon"));
        assert_eq!(outcome.document.get("language").unwrap(), &ConfigValue::from("fr"));
    }

    #[test]
    fn test_forced_import_never_applies_null() {
        let current = customised();
        let incoming = candidates(json!({ "theme": null, "debug": false }));

        let outcome = import(&current, &incoming, ImportMode::Merge, true).unwrap();

        assert_eq!(outcome.applied, vec!["debug"]);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].reason, ValidationReason::WrongType);
        assert_eq!(outcome.document.get("theme").unwrap(), &ConfigValue::from("rainbow"));
    }

    // ── Parsing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_rejects_non_object_json() {
        assert!(parse_candidates("[1, 2, 3]", ExportFormat::Json).is_err());
        assert!(parse_candidates("{ not json", ExportFormat::Json).is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_toml() {
        assert!(parse_candidates("[[[ not valid toml", ExportFormat::Toml).is_err());
    }

    #[test]
    fn test_nested_toml_table_is_wrong_type() {
        let parsed = parse_candidates("[theme]\nname = \"dark\"\n", ExportFormat::Toml).unwrap();
        let err = import(&ConfigDocument::defaults(), &parsed, ImportMode::Merge, false)
            .unwrap_err();
        assert_eq!(err.validation_errors()[0].reason, ValidationReason::WrongType);
    }
}
