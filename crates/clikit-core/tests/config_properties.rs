//! Integration tests for the configuration model.
//!
//! These tests exercise the public API end-to-end: schema, validation,
//! document operations and the export/import codec together.

use clikit_core::transfer::{export, import, parse_candidates, Candidates};
use clikit_core::{
    ConfigDocument, ConfigError, ConfigValue, ExportFormat, ExportScope, ImportMode,
    ValidationReason, SCHEMA,
};
use serde_json::{json, Value};

fn object(value: Value) -> Candidates {
    match value {
        Value::Object(map) => map,
        _ => panic!("fixture must be a JSON object"),
    }
}

/// A handful of valid documents that differ from the defaults in various ways.
fn sample_documents() -> Vec<ConfigDocument> {
    let edits: Vec<Vec<(&str, Value)>> = vec![
        vec![],
        vec![("theme", json!("dark"))],
        vec![("maxItems", json!("1000")), ("colorOutput", json!("false"))],
        vec![
            ("dateFormat", json!("DD/MM/YYYY")),
            ("defaultPriority", json!("high")),
            ("autoSave", json!(false)),
            ("apiUrl", json!("http://localhost:3000")),
            ("timeout", json!(60000)),
            ("language", json!("es")),
            ("debug", json!(true)),
        ],
    ];

    edits
        .into_iter()
        .map(|pairs| {
            pairs.into_iter().fold(ConfigDocument::defaults(), |doc, (key, raw)| {
                doc.set(key, &raw, false).expect("fixture edit must be valid").0
            })
        })
        .collect()
}

// ── Round-trip law ────────────────────────────────────────────────────────────

#[test]
fn test_round_trip_law_holds_for_both_formats() {
    for doc in sample_documents() {
        for format in [ExportFormat::Json, ExportFormat::Toml] {
            // Arrange
            let text = export(&doc, ExportScope::All, format).expect("export");

            // Act
            let parsed = parse_candidates(&text, format).expect("parse");
            let outcome = import(&ConfigDocument::defaults(), &parsed, ImportMode::Replace, false)
                .expect("import");

            // Assert
            assert_eq!(outcome.document, doc, "format {format}");
        }
    }
}

// ── Modified-only export ──────────────────────────────────────────────────────

#[test]
fn test_modified_only_export_contains_exactly_changed_keys() {
    for doc in sample_documents() {
        let text = export(&doc, ExportScope::ModifiedOnly, ExportFormat::Json).unwrap();
        let parsed = parse_candidates(&text, ExportFormat::Json).unwrap();

        for setting in SCHEMA {
            let modified = doc.get(setting.key).unwrap() != &setting.default_value();
            assert_eq!(
                parsed.contains_key(setting.key),
                modified,
                "key {} presence must match modification",
                setting.key
            );
        }
    }
}

#[test]
fn test_modified_only_export_merged_into_defaults_reproduces_document() {
    for doc in sample_documents() {
        let text = export(&doc, ExportScope::ModifiedOnly, ExportFormat::Toml).unwrap();
        let parsed = parse_candidates(&text, ExportFormat::Toml).unwrap();
        let outcome =
            import(&ConfigDocument::defaults(), &parsed, ImportMode::Merge, false).unwrap();
        assert_eq!(outcome.document, doc);
    }
}

// ── Merge vs replace ──────────────────────────────────────────────────────────

#[test]
fn test_merge_and_replace_differ_only_on_absent_keys() {
    let current = sample_documents().pop().expect("at least one sample");
    let incoming = object(json!({ "theme": "light", "maxItems": 7 }));

    let merged = import(&current, &incoming, ImportMode::Merge, false).unwrap().document;
    let replaced = import(&current, &incoming, ImportMode::Replace, false).unwrap().document;

    for setting in SCHEMA {
        let key = setting.key;
        if incoming.contains_key(key) {
            assert_eq!(merged.get(key).unwrap(), replaced.get(key).unwrap());
        } else {
            assert_eq!(merged.get(key).unwrap(), current.get(key).unwrap());
            assert_eq!(replaced.get(key).unwrap(), &setting.default_value());
        }
    }
}

// ── Concrete scenarios ────────────────────────────────────────────────────────

#[test]
fn test_scenario_set_theme_dark() {
    let (doc, change) = ConfigDocument::defaults()
        .set("theme", &json!("dark"), false)
        .unwrap();
    assert_eq!(change.previous, ConfigValue::from("default"));
    assert_eq!(change.current, ConfigValue::from("dark"));
    assert_eq!(doc.get("theme").unwrap(), &ConfigValue::from("dark"));
}

#[test]
fn test_scenario_set_theme_neon_is_out_of_range() {
    let err = ConfigDocument::defaults()
        .set("theme", &json!("neon"), false)
        .unwrap_err();
    match err {
        ConfigError::Invalid(e) => {
            assert_eq!(e.reason, ValidationReason::OutOfRange);
            assert_eq!(e.suggestion, "Must be one of: default, dark, light, rainbow");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_scenario_set_max_items_from_string() {
    let (doc, _) = ConfigDocument::defaults()
        .set("maxItems", &json!("150"), false)
        .unwrap();
    assert_eq!(doc.get("maxItems").unwrap(), &ConfigValue::Integer(150));
}

#[test]
fn test_scenario_reset_theme() {
    let (dark, _) = ConfigDocument::defaults()
        .set("theme", &json!("dark"), false)
        .unwrap();
    let (reset, change) = dark.reset_key("theme").unwrap();
    assert_eq!(change.previous, ConfigValue::from("dark"));
    assert_eq!(change.current, ConfigValue::from("default"));
    assert_eq!(reset.get("theme").unwrap(), &ConfigValue::from("default"));
}

#[test]
fn test_scenario_import_with_one_bad_entry_is_aborted() {
    let current = ConfigDocument::defaults();
    let incoming = object(json!({ "theme": "dark", "colorOutput": "notabool" }));

    let err = import(&current, &incoming, ImportMode::Merge, false).unwrap_err();

    assert!(matches!(err, ConfigError::ImportRejected(ref errors) if errors.len() == 1));
    assert_eq!(err.validation_errors()[0].key, "colorOutput");
}

#[test]
fn test_scenario_modified_only_export_of_defaults_is_empty() {
    let text = export(&ConfigDocument::defaults(), ExportScope::ModifiedOnly, ExportFormat::Json)
        .unwrap();
    let parsed = parse_candidates(&text, ExportFormat::Json).unwrap();
    assert!(parsed.is_empty());
}
