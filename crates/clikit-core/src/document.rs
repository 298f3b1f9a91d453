//! The live configuration document.
//!
//! A [`ConfigDocument`] always holds exactly one value per schema key; there
//! is no way to build one with a key missing.  Construction from stored data
//! overlays whatever keys were stored onto the defaults, which keeps old
//! files loadable after new keys are added to the schema.
//!
//! Mutating operations (`set`, `reset_key`, `reset_all`) never modify the
//! receiver.  They return a new document together with a [`Change`] record so
//! the caller can display the transition and decide whether to persist it.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{ConfigError, ValidationError};
use crate::schema::{self, ConfigValue, Setting, SCHEMA};
use crate::validate;

/// Complete mapping from schema key to current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    // Indexed by schema position; always SCHEMA.len() long.
    values: Vec<ConfigValue>,
}

/// Before/after record of one key's transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub key: &'static str,
    pub previous: ConfigValue,
    pub current: ConfigValue,
}

/// A key whose current value differs from its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modification<'a> {
    pub setting: &'static Setting,
    pub default: ConfigValue,
    pub current: &'a ConfigValue,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::defaults()
    }
}

impl ConfigDocument {
    /// The document where every key holds its schema default.
    pub fn defaults() -> Self {
        Self {
            values: SCHEMA.iter().map(Setting::default_value).collect(),
        }
    }

    /// Overlays stored key/value pairs onto `base`.
    ///
    /// Unknown keys and `null` values are dropped.  Known keys are coerced without enforcing
    /// their constraint so that values written through a skip-validation path
    /// survive a reload; such values are logged at `warn` level.
    pub fn overlay(base: &ConfigDocument, stored: &Map<String, Value>) -> Self {
        let mut doc = base.clone();
        for (key, raw) in stored {
            let Some(idx) = schema::position(key) else {
                debug!("ignoring unknown stored key '{key}'");
                continue;
            };
            if raw.is_null() {
                debug!("stored '{key}' is null, keeping its default");
                continue;
            }
            match validate::coerce_unchecked(key, raw) {
                Ok(value) => {
                    if let Err(e) = validate::check_value(key, &value) {
                        warn!("stored value does not satisfy its rule: {e}");
                    }
                    doc.values[idx] = value;
                }
                Err(e) => debug!("ignoring stored entry: {e}"),
            }
        }
        doc
    }

    /// Builds a document from stored pairs, defaulting every missing key.
    pub fn from_stored(stored: &Map<String, Value>) -> Self {
        Self::overlay(&Self::defaults(), stored)
    }

    /// Returns the value of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] if `key` is not declared in the schema
    /// (including the empty string).
    pub fn get(&self, key: &str) -> Result<&ConfigValue, ConfigError> {
        schema::position(key)
            .map(|idx| &self.values[idx])
            .ok_or_else(|| ConfigError::unknown_key(key))
    }

    /// Iterates over every `(setting, value)` pair in schema order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static Setting, &ConfigValue)> + '_ {
        SCHEMA.iter().zip(self.values.iter())
    }

    pub fn is_modified(&self, key: &str) -> bool {
        match schema::position(key) {
            Some(idx) => self.values[idx] != SCHEMA[idx].default_value(),
            None => false,
        }
    }

    /// Keys whose value differs from the schema default, in schema order.
    pub fn modifications(&self) -> Vec<Modification<'_>> {
        self.entries()
            .filter_map(|(setting, current)| {
                let default = setting.default_value();
                (*current != default).then_some(Modification {
                    setting,
                    default,
                    current,
                })
            })
            .collect()
    }

    /// Re-validates every stored value.
    ///
    /// An empty result means the document is sound; anything else was written
    /// through a skip-validation or forced-import path.
    pub fn check(&self) -> Vec<ValidationError> {
        self.entries()
            .filter_map(|(setting, value)| validate::check_value(setting.key, value).err())
            .collect()
    }

    /// Returns a copy of this document with `key` set from `raw`.
    ///
    /// With `skip_validation` the value is coerced but its constraint is not
    /// enforced.  Unknown keys are rejected either way.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] or [`ConfigError::Invalid`].
    pub fn set(
        &self,
        key: &str,
        raw: &Value,
        skip_validation: bool,
    ) -> Result<(ConfigDocument, Change), ConfigError> {
        let idx = schema::position(key).ok_or_else(|| ConfigError::unknown_key(key))?;
        let value = if skip_validation {
            validate::coerce_unchecked(key, raw)?
        } else {
            validate::validate(key, raw)?
        };
        Ok(self.replaced(idx, value))
    }

    /// Returns a copy of this document with `key` restored to its default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] if `key` is not declared.
    pub fn reset_key(&self, key: &str) -> Result<(ConfigDocument, Change), ConfigError> {
        let idx = schema::position(key).ok_or_else(|| ConfigError::unknown_key(key))?;
        Ok(self.replaced(idx, SCHEMA[idx].default_value()))
    }

    /// Returns the default document plus a [`Change`] for every key that was
    /// modified.
    pub fn reset_all(&self) -> (ConfigDocument, Vec<Change>) {
        let changes = self
            .modifications()
            .into_iter()
            .map(|m| Change {
                key: m.setting.key,
                previous: m.current.clone(),
                current: m.default,
            })
            .collect();
        (Self::defaults(), changes)
    }

    pub(crate) fn assign(&mut self, idx: usize, value: ConfigValue) {
        self.values[idx] = value;
    }

    fn replaced(&self, idx: usize, value: ConfigValue) -> (ConfigDocument, Change) {
        let mut next = self.clone();
        let previous = std::mem::replace(&mut next.values[idx], value.clone());
        let change = Change {
            key: SCHEMA[idx].key,
            previous,
            current: value,
        };
        (next, change)
    }
}

/// Serialises every key in schema order as a flat map.
impl Serialize for ConfigDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (setting, value) in self.entries() {
            map.serialize_entry(setting.key, value)?;
        }
        map.end()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
