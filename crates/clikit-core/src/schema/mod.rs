//! The closed configuration schema.
//!
//! Every setting clikit understands is declared once, in [`SCHEMA`].  Each
//! entry fixes the key, the declared type, the default value and the rule a
//! value must satisfy.  The schema is closed: there is no way to add a key at
//! runtime, and any lookup of an undeclared key is an error.
//!
//! # Declared types
//!
//! | Kind                    | Stored as                 | Rule                          |
//! |-------------------------|---------------------------|-------------------------------|
//! | [`SettingKind::Text`]   | [`ConfigValue::Text`]     | optional [`TextRule`]         |
//! | [`SettingKind::Integer`]| [`ConfigValue::Integer`]  | inclusive `min..=max`         |
//! | [`SettingKind::Boolean`]| [`ConfigValue::Boolean`]  | none                          |
//! | [`SettingKind::Choice`] | [`ConfigValue::Text`]     | member of an ordered list     |
//!
//! The order of [`SCHEMA`] is significant: documents iterate, list and
//! serialise their keys in this order.

pub mod value;

pub use value::ConfigValue;

/// Declared type and constraint of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// Free text, optionally restricted by a [`TextRule`].
    Text(TextRule),
    /// Integer within an inclusive range.
    Integer { min: i64, max: i64 },
    Boolean,
    /// One of a finite, ordered set of strings.
    Choice(&'static [&'static str]),
}

/// Extra constraint applied to [`SettingKind::Text`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRule {
    Any,
    /// Non-empty and starting with `http://` or `https://`.
    HttpUrl,
}

/// Compile-time default of a setting.
///
/// [`ConfigValue`] owns its string, so the static table stores this borrowed
/// twin instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Boolean(bool),
    Integer(i64),
    Text(&'static str),
}

impl DefaultValue {
    pub fn to_value(self) -> ConfigValue {
        match self {
            DefaultValue::Boolean(b) => ConfigValue::Boolean(b),
            DefaultValue::Integer(n) => ConfigValue::Integer(n),
            DefaultValue::Text(s) => ConfigValue::Text(s.to_string()),
        }
    }
}

/// One entry of the configuration schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
    /// Stable identifier, never renamed at runtime.
    pub key: &'static str,
    pub kind: SettingKind,
    pub default: DefaultValue,
    /// Human-readable description shown by `config list`.
    pub description: &'static str,
}

impl Setting {
    pub fn default_value(&self) -> ConfigValue {
        self.default.to_value()
    }

    /// Type label as presented to users: `string`, `integer`, `boolean` or `enum`.
    pub fn type_label(&self) -> &'static str {
        match self.kind {
            SettingKind::Text(_) => "string",
            SettingKind::Integer { .. } => "integer",
            SettingKind::Boolean => "boolean",
            SettingKind::Choice(_) => "enum",
        }
    }

    /// Corrective hint attached to every validation error for this key.
    pub fn suggestion(&self) -> String {
        match self.kind {
            SettingKind::Text(TextRule::Any) => "Must be a text value".to_string(),
            SettingKind::Text(TextRule::HttpUrl) => {
                "Must be a URL starting with http:// or https://".to_string()
            }
            SettingKind::Integer { min, max } => {
                format!("Must be a number between {min} and {max}")
            }
            SettingKind::Boolean => "Must be true or false".to_string(),
            SettingKind::Choice(allowed) => format!("Must be one of: {}", allowed.join(", ")),
        }
    }
}

// ── Schema table ──────────────────────────────────────────────────────────────

pub const THEMES: &[&str] = &["default", "dark", "light", "rainbow"];
pub const DATE_FORMATS: &[&str] = &["YYYY-MM-DD", "MM/DD/YYYY", "DD/MM/YYYY"];
pub const PRIORITIES: &[&str] = &["low", "medium", "high"];
pub const LANGUAGES: &[&str] = &["en", "es", "fr", "de", "ja"];

/// Every setting clikit understands, in presentation order.
pub const SCHEMA: &[Setting] = &[
    Setting {
        key: "theme",
        kind: SettingKind::Choice(THEMES),
        default: DefaultValue::Text("default"),
        description: "Color theme for terminal output",
    },
    Setting {
        key: "colorOutput",
        kind: SettingKind::Boolean,
        default: DefaultValue::Boolean(true),
        description: "Enable colored output",
    },
    Setting {
        key: "dateFormat",
        kind: SettingKind::Choice(DATE_FORMATS),
        default: DefaultValue::Text("YYYY-MM-DD"),
        description: "Date display format",
    },
    Setting {
        key: "defaultPriority",
        kind: SettingKind::Choice(PRIORITIES),
        default: DefaultValue::Text("medium"),
        description: "Default priority for new tasks",
    },
    Setting {
        key: "autoSave",
        kind: SettingKind::Boolean,
        default: DefaultValue::Boolean(true),
        description: "Automatically save changes",
    },
    Setting {
        key: "maxItems",
        kind: SettingKind::Integer { min: 1, max: 1000 },
        default: DefaultValue::Integer(100),
        description: "Maximum items to display in lists",
    },
    Setting {
        key: "apiUrl",
        kind: SettingKind::Text(TextRule::HttpUrl),
        default: DefaultValue::Text("https://api.example.com"),
        description: "Base URL for API requests",
    },
    Setting {
        key: "timeout",
        kind: SettingKind::Integer { min: 1000, max: 60000 },
        default: DefaultValue::Integer(5000),
        description: "Request timeout in milliseconds",
    },
    Setting {
        key: "language",
        kind: SettingKind::Choice(LANGUAGES),
        default: DefaultValue::Text("en"),
        description: "Interface language",
    },
    Setting {
        key: "debug",
        kind: SettingKind::Boolean,
        default: DefaultValue::Boolean(false),
        description: "Enable debug mode",
    },
];

// ── Lookup ────────────────────────────────────────────────────────────────────

/// Returns the schema entry for `key`, if declared.
pub fn setting(key: &str) -> Option<&'static Setting> {
    SCHEMA.iter().find(|s| s.key == key)
}

/// Returns the schema index of `key`, if declared.
pub fn position(key: &str) -> Option<usize> {
    SCHEMA.iter().position(|s| s.key == key)
}

/// All schema keys in presentation order.
pub fn keys() -> Vec<&'static str> {
    SCHEMA.iter().map(|s| s.key).collect()
}
