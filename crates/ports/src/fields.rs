//! Structured key/value fields.
//!
//! Callers pass fields as an ordered slice of [`KeyValue`]. Backends receive a
//! [`LogFields`] mapping built with [`fields_from_kv`], where a repeated key
//! keeps the value of its last occurrence.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Field mapping attached to a single log line.
pub type LogFields = BTreeMap<Box<str>, Value>;

/// A single structured field: a string key and an arbitrary value.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    /// Field name.
    pub key: Box<str>,
    /// Field value.
    pub value: Value,
}

impl KeyValue {
    /// Create a field from anything convertible into a JSON value.
    pub fn new(key: impl Into<Box<str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K, V> From<(K, V)> for KeyValue
where
    K: Into<Box<str>>,
    V: Into<Value>,
{
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Build an array of [`KeyValue`] from `key => value` pairs.
///
/// ```
/// use kvlog_ports::kv;
///
/// let fields = kv!["user" => "ada", "attempt" => 3];
/// assert_eq!(fields.len(), 2);
/// assert_eq!(&*fields[0].key, "user");
/// ```
#[macro_export]
macro_rules! kv {
    ($($key:expr => $value:expr),* $(,)?) => {
        [$($crate::KeyValue::new($key, $value)),*]
    };
}

/// Convert ordered key/value pairs into a field mapping.
///
/// Later pairs overwrite earlier pairs with the same key. An empty slice
/// yields an empty mapping.
pub fn fields_from_kv(kv: &[KeyValue]) -> LogFields {
    let mut fields = LogFields::new();
    for pair in kv {
        fields.insert(pair.key.clone(), pair.value.clone());
    }
    fields
}

/// Render a field mapping as space separated `key=value` entries.
#[must_use]
pub const fn display_fields(fields: &LogFields) -> FieldsDisplay<'_> {
    FieldsDisplay(fields)
}

/// `Display` adapter returned by [`display_fields`].
///
/// Keys are written in sorted order. Strings are written bare unless they
/// are empty or contain whitespace, `=`, `"` or control characters, in which
/// case they are quoted. Other values use compact JSON.
#[derive(Debug, Clone, Copy)]
pub struct FieldsDisplay<'a>(&'a LogFields);

impl fmt::Display for FieldsDisplay<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in self.0 {
            if !first {
                formatter.write_str(" ")?;
            }
            first = false;
            write_token(formatter, key)?;
            formatter.write_str("=")?;
            match value {
                Value::String(text) => write_token(formatter, text)?,
                other => write!(formatter, "{other}")?,
            }
        }
        Ok(())
    }
}

/// Render a field mapping as a compact JSON object.
#[must_use]
pub const fn json_fields(fields: &LogFields) -> FieldsJson<'_> {
    FieldsJson(fields)
}

/// `Display` adapter returned by [`json_fields`].
///
/// Values keep their JSON types, so numbers and booleans survive a round
/// trip through a JSON log line.
#[derive(Debug, Clone, Copy)]
pub struct FieldsJson<'a>(&'a LogFields);

impl fmt::Display for FieldsJson<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self.0).map_err(|_| fmt::Error)?;
        formatter.write_str(&text)
    }
}

fn write_token(formatter: &mut fmt::Formatter<'_>, token: &str) -> fmt::Result {
    if needs_quoting(token) {
        write!(formatter, "{token:?}")
    } else {
        formatter.write_str(token)
    }
}

fn needs_quoting(token: &str) -> bool {
    token.is_empty()
        || token
            .chars()
            .any(|ch| ch.is_whitespace() || ch.is_control() || ch == '=' || ch == '"')
}
