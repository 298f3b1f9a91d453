//! Text rendering for `config` command output.
//!
//! Every renderer returns a `String`; the binary decides where it goes.

use clap::ValueEnum;
use clikit_core::{Change, ConfigValue, ValidationError};
use serde::ser::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::application::config_store::ListEntry;

/// How `get` and `list` present their results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputStyle {
    /// `key = value` lines.
    #[default]
    Plain,
    /// A JSON object (or array for `list`).
    Json,
    /// Aligned columns with a header row.
    Table,
}

/// Renders a single resolved key.
pub fn render_value(key: &str, value: &ConfigValue, style: OutputStyle) -> String {
    match style {
        OutputStyle::Plain => format!("{value}\n"),
        OutputStyle::Json => {
            let mut map = Map::new();
            map.insert(key.to_string(), value.to_json());
            format!("{:#}\n", Value::Object(map))
        }
        OutputStyle::Table => table(&["KEY", "VALUE"], vec![vec![key.to_string(), value.to_string()]]),
    }
}

/// Entries serialised as one map, keys in schema order.
struct ValueMap<'a>(&'a [ListEntry]);

impl Serialize for ValueMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|e| (e.setting.key, &e.value)))
    }
}

/// Renders every key with its value (`get --all`).
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if JSON serialisation fails.
pub fn render_values(entries: &[ListEntry], style: OutputStyle) -> serde_json::Result<String> {
    let text: String = match style {
        OutputStyle::Plain => entries
            .iter()
            .map(|e| format!("{} = {}\n", e.setting.key, e.value))
            .collect(),
        OutputStyle::Json => serde_json::to_string_pretty(&ValueMap(entries))? + "\n",
        OutputStyle::Table => table(
            &["KEY", "VALUE"],
            entries
                .iter()
                .map(|e| vec![e.setting.key.to_string(), e.value.to_string()])
                .collect(),
        ),
    };
    Ok(text)
}

/// Renders every key with value, type, default and description (`list`).
///
/// Modified keys are marked with `*` in plain and table output.
pub fn render_list(entries: &[ListEntry], style: OutputStyle) -> String {
    match style {
        OutputStyle::Plain => entries
            .iter()
            .map(|e| {
                let marker = if e.modified { "*" } else { " " };
                format!(
                    "{marker} {} = {}\n    {}\n",
                    e.setting.key, e.value, e.setting.description
                )
            })
            .collect(),
        OutputStyle::Json => {
            let items: Vec<Value> = entries
                .iter()
                .map(|e| {
                    json!({
                        "key": e.setting.key,
                        "value": e.value.to_json(),
                        "type": e.setting.type_label(),
                        "default": e.setting.default_value().to_json(),
                        "description": e.setting.description,
                        "modified": e.modified,
                    })
                })
                .collect();
            format!("{:#}\n", Value::Array(items))
        }
        OutputStyle::Table => table(
            &["", "KEY", "VALUE", "TYPE", "DEFAULT", "DESCRIPTION"],
            entries
                .iter()
                .map(|e| {
                    vec![
                        if e.modified { "*" } else { "" }.to_string(),
                        e.setting.key.to_string(),
                        e.value.to_string(),
                        e.setting.type_label().to_string(),
                        e.setting.default_value().to_string(),
                        e.setting.description.to_string(),
                    ]
                })
                .collect(),
        ),
    }
}

/// `key: previous -> current`, one line per change.
pub fn render_changes(changes: &[Change]) -> String {
    changes
        .iter()
        .map(|c| format!("{}: {} -> {}\n", c.key, c.previous, c.current))
        .collect()
}

/// One indented line per error, with its suggestion.
pub fn render_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  {} ({}): {}\n", e.key, e.reason, e.suggestion))
        .collect()
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = table_row(headers, &widths);
    out.push_str(&table_row(&rule.iter().map(String::as_str).collect::<Vec<_>>(), &widths));
    for row in &rows {
        out.push_str(&table_row(&row.iter().map(String::as_str).collect::<Vec<_>>(), &widths));
    }
    out
}

fn table_row(cells: &[&str], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{cell:<w$}", w = *w))
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
