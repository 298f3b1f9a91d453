//! Error types shared by every configuration operation.
//!
//! Validation failures are values, never panics: the command layer decides
//! how to word them and which exit status to use.

use std::fmt;

use thiserror::Error;

use crate::schema::{self, Setting};

/// Why a candidate value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    /// The key is not declared in the schema.
    UnknownKey,
    /// The value cannot be coerced to the key's declared type.
    WrongType,
    /// The value has the right type but violates the range, choice list or text rule.
    OutOfRange,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValidationReason::UnknownKey => "unknown-key",
            ValidationReason::WrongType => "wrong-type",
            ValidationReason::OutOfRange => "out-of-range",
        })
    }
}

/// A single rejected key/value pair, with a key-specific corrective hint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for '{key}' ({reason}): {suggestion}")]
pub struct ValidationError {
    pub key: String,
    pub reason: ValidationReason,
    pub suggestion: String,
}

impl ValidationError {
    pub(crate) fn for_setting(setting: &Setting, reason: ValidationReason) -> Self {
        Self {
            key: setting.key.to_string(),
            reason,
            suggestion: setting.suggestion(),
        }
    }

    pub(crate) fn unknown_key(key: &str) -> Self {
        Self {
            key: key.to_string(),
            reason: ValidationReason::UnknownKey,
            suggestion: format!("Valid keys: {}", schema::keys().join(", ")),
        }
    }
}

/// Errors raised while rendering or parsing export files.
#[derive(Debug, Error)]
pub enum TransferError {
    /// JSON could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The document could not be serialised to TOML.
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The key is not declared in the schema.
    #[error("unknown configuration key '{key}' (valid keys: {})", .valid_keys.join(", "))]
    UnknownKey {
        key: String,
        valid_keys: Vec<&'static str>,
    },

    /// The value failed its key's validator.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// One or more imported entries failed validation and the import was not forced.
    #[error("import rejected: {}", summarize(.0))]
    ImportRejected(Vec<ValidationError>),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl ConfigError {
    pub(crate) fn unknown_key(key: &str) -> Self {
        ConfigError::UnknownKey {
            key: key.to_string(),
            valid_keys: schema::keys(),
        }
    }

    /// Every validation error carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ConfigError::Invalid(e) => std::slice::from_ref(e),
            ConfigError::ImportRejected(errors) => errors,
            _ => &[],
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    format!("{} invalid entries; {}", errors.len(), details.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_error_lists_every_valid_key() {
        let err = ConfigError::unknown_key("colour");
        let msg = err.to_string();
        assert!(msg.contains("'colour'"));
        for key in schema::keys() {
            assert!(msg.contains(key), "message must mention {key}: {msg}");
        }
    }

    #[test]
    fn test_validation_error_display_includes_reason_and_suggestion() {
        let theme = schema::setting("theme").unwrap();
        let err = ValidationError::for_setting(theme, ValidationReason::OutOfRange);
        assert_eq!(
            err.to_string(),
            "invalid value for 'theme' (out-of-range): Must be one of: default, dark, light, rainbow"
        );
    }

    #[test]
    fn test_import_rejected_reports_count() {
        let err = ConfigError::ImportRejected(vec![
            ValidationError::unknown_key("a"),
            ValidationError::unknown_key("b"),
        ]);
        assert!(err.to_string().starts_with("import rejected: 2 invalid entries"));
        assert_eq!(err.validation_errors().len(), 2);
    }
}
