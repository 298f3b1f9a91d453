//! Coercion and validation of raw candidate values.
//!
//! Raw values arrive either as command-line strings (`config set maxItems 150`)
//! or as already-typed JSON/TOML scalars from an import file.  Both are
//! represented as [`serde_json::Value`] so one code path handles them.
//!
//! Coercion is directed by the key's declared type:
//!
//! - boolean keys accept `true`/`false` and the strings `"true"`/`"false"`;
//! - integer keys accept integers, floats with no fractional part, and
//!   strings whose trimmed form is such a number (`"150"`, `"150.0"`, `"1e2"`);
//!   empty and whitespace-only strings are rejected, they are not zero;
//! - string and enum keys accept strings only.
//!
//! [`validate`] is a pure function of the schema, the key and the raw value.

use serde_json::Value;

use crate::error::{ValidationError, ValidationReason};
use crate::schema::{self, ConfigValue, Setting, SettingKind, TextRule};

/// Coerces `raw` to the declared type of `key` and checks its constraint.
///
/// # Errors
///
/// Returns a [`ValidationError`] with reason `unknown-key`, `wrong-type` or
/// `out-of-range`.
///
/// # Examples
///
/// ```rust
/// use clikit_core::validate::validate;
/// use clikit_core::ConfigValue;
///
/// let v = validate("maxItems", &serde_json::json!("150")).unwrap();
/// assert_eq!(v, ConfigValue::Integer(150));
/// ```
pub fn validate(key: &str, raw: &Value) -> Result<ConfigValue, ValidationError> {
    let setting = schema::setting(key).ok_or_else(|| ValidationError::unknown_key(key))?;
    validate_setting(setting, raw)
}

/// Convenience wrapper for command-line input.
///
/// # Errors
///
/// See [`validate`].
pub fn validate_str(key: &str, raw: &str) -> Result<ConfigValue, ValidationError> {
    validate(key, &Value::String(raw.to_string()))
}

/// Checks an already-typed value against the rule for `key`.
///
/// Used to re-verify stored documents, which may hold values written through
/// a skip-validation path.
///
/// # Errors
///
/// See [`validate`].
pub fn check_value(key: &str, value: &ConfigValue) -> Result<(), ValidationError> {
    let setting = schema::setting(key).ok_or_else(|| ValidationError::unknown_key(key))?;
    check(setting, value)
}

/// Coerces `raw` without enforcing the key's constraint.
///
/// Type-directed coercion is tried first; if the value does not fit the
/// declared type it is kept in whatever shape it has.  Unknown keys are still
/// rejected because the schema is closed.
///
/// # Errors
///
/// Returns a [`ValidationError`] with reason `unknown-key`.
pub fn coerce_unchecked(key: &str, raw: &Value) -> Result<ConfigValue, ValidationError> {
    let setting = schema::setting(key).ok_or_else(|| ValidationError::unknown_key(key))?;
    Ok(coerce(setting.kind, raw).unwrap_or_else(|| coerce_any(raw)))
}

pub(crate) fn validate_setting(setting: &Setting, raw: &Value) -> Result<ConfigValue, ValidationError> {
    let value = coerce(setting.kind, raw)
        .ok_or_else(|| ValidationError::for_setting(setting, ValidationReason::WrongType))?;
    check(setting, &value)?;
    Ok(value)
}

// ── Coercion ──────────────────────────────────────────────────────────────────

fn coerce(kind: SettingKind, raw: &Value) -> Option<ConfigValue> {
    match kind {
        SettingKind::Boolean => match raw {
            Value::Bool(b) => Some(ConfigValue::Boolean(*b)),
            Value::String(s) => parse_bool(s).map(ConfigValue::Boolean),
            _ => None,
        },
        SettingKind::Integer { .. } => match raw {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(whole_f64))
                .map(ConfigValue::Integer),
            Value::String(s) => parse_integer(s).map(ConfigValue::Integer),
            _ => None,
        },
        SettingKind::Text(_) | SettingKind::Choice(_) => match raw {
            Value::String(s) => Some(ConfigValue::Text(s.clone())),
            _ => None,
        },
    }
}

/// Shape-preserving fallback used by [`coerce_unchecked`].
fn coerce_any(raw: &Value) -> ConfigValue {
    match raw {
        Value::Bool(b) => ConfigValue::Boolean(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => ConfigValue::Integer(i),
            None => ConfigValue::Text(n.to_string()),
        },
        Value::String(s) => parse_bool(s)
            .map(ConfigValue::Boolean)
            .or_else(|| parse_integer(s).map(ConfigValue::Integer))
            .unwrap_or_else(|| ConfigValue::Text(s.clone())),
        other => ConfigValue::Text(other.to_string()),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_integer(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(whole_f64))
}

fn whole_f64(f: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; the strict upper bound excludes it.
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

// ── Constraint checks ─────────────────────────────────────────────────────────

fn check(setting: &Setting, value: &ConfigValue) -> Result<(), ValidationError> {
    let reject = |reason| Err(ValidationError::for_setting(setting, reason));
    match (setting.kind, value) {
        (SettingKind::Boolean, ConfigValue::Boolean(_)) => Ok(()),
        (SettingKind::Integer { min, max }, ConfigValue::Integer(n)) => {
            if (min..=max).contains(n) {
                Ok(())
            } else {
                reject(ValidationReason::OutOfRange)
            }
        }
        (SettingKind::Choice(allowed), ConfigValue::Text(s)) => {
            if allowed.contains(&s.as_str()) {
                Ok(())
            } else {
                reject(ValidationReason::OutOfRange)
            }
        }
        (SettingKind::Text(rule), ConfigValue::Text(s)) => {
            if text_matches(rule, s) {
                Ok(())
            } else {
                reject(ValidationReason::OutOfRange)
            }
        }
        _ => reject(ValidationReason::WrongType),
    }
}

fn text_matches(rule: TextRule, s: &str) -> bool {
    match rule {
        TextRule::Any => true,
        TextRule::HttpUrl => ["http://", "https://"]
            .iter()
            .any(|scheme| s.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty())),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
