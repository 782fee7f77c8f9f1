//! Text encoding for structured sub-fields.
//!
//! Array and object values are stored as JSON text. Reading them back goes
//! through [`decode`], the one place that decides what happens when stored
//! text is not what the view expects: JSON of another shape is kept as
//! [`Decoded::Json`], text that is not JSON as [`Decoded::Raw`], and the
//! record is still returned.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// A structured field decoded from its stored text form.
///
/// Serializes untagged: a decoded value as itself, JSON as the parsed
/// JSON, a fallback as the original string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Decoded<T> {
    /// The stored text parsed as `T` with nothing lost.
    Value(T),
    /// Valid JSON that `T` cannot carry exactly; returned as parsed.
    Json(Value),
    /// The stored text is not JSON; returned verbatim.
    Raw(String),
}

impl<T> Decoded<T> {
    /// The decoded value, if the stored text matched `T` exactly.
    pub fn value(&self) -> Option<&T> {
        match self {
            Decoded::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Consume and return the decoded value, if the stored text matched `T`
    /// exactly.
    pub fn into_value(self) -> Option<T> {
        match self {
            Decoded::Value(value) => Some(value),
            _ => None,
        }
    }

    /// True when the stored text was passed through undecoded.
    pub fn is_raw(&self) -> bool {
        matches!(self, Decoded::Raw(_))
    }
}

impl Decoded<Vec<String>> {
    /// The text entries of a list, in order.
    ///
    /// Non-string members of a JSON list are rendered as JSON; anything
    /// that is not a list has no entries.
    pub fn entries(&self) -> Vec<String> {
        match self {
            Decoded::Value(items) => items.clone(),
            Decoded::Json(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect(),
            Decoded::Json(_) | Decoded::Raw(_) => Vec::new(),
        }
    }

    /// The list joined with `separator`, or the stored form when the field
    /// is not a list.
    pub fn joined(&self, separator: &str) -> String {
        match self {
            Decoded::Value(_) | Decoded::Json(Value::Array(_)) => {
                self.entries().join(separator)
            }
            Decoded::Json(other) => other.to_string(),
            Decoded::Raw(text) => text.clone(),
        }
    }
}

impl<T: Default> Default for Decoded<T> {
    fn default() -> Self {
        Decoded::Value(T::default())
    }
}

/// Decode stored text into `T`.
///
/// Never fails. Empty text is the empty `T`. Valid JSON that `T` would
/// reshape (extra keys, nulls, other member types) comes back as
/// [`Decoded::Json`] so nothing stored is dropped; text that is not JSON
/// comes back as [`Decoded::Raw`].
pub fn decode<T>(text: &str) -> Decoded<T>
where
    T: DeserializeOwned + Serialize + Default,
{
    if text.trim().is_empty() {
        return Decoded::default();
    }

    let parsed: Value = match serde_json::from_str(text) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(error = %e, "stored field is not valid JSON; passing raw text through");
            return Decoded::Raw(text.to_string());
        }
    };

    match T::deserialize(&parsed) {
        Ok(value) if round_trips(&value, &parsed) => Decoded::Value(value),
        Ok(_) => {
            debug!("stored field carries members the view does not model; keeping its JSON");
            Decoded::Json(parsed)
        }
        Err(e) => {
            debug!(error = %e, "stored field has an unexpected shape; keeping its JSON");
            Decoded::Json(parsed)
        }
    }
}

fn round_trips<T: Serialize>(value: &T, parsed: &Value) -> bool {
    serde_json::to_value(value).is_ok_and(|typed| same_json(&typed, parsed))
}

/// Structural JSON equality with numbers compared by value, so `45` and
/// `45.0` are the same.
fn same_json(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| same_json(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(name, x)| ys.get(name).is_some_and(|y| same_json(x, y)))
        }
        _ => a == b,
    }
}

/// Encode one field value for storage.
///
/// Arrays and objects become JSON text; scalars are stored as-is.
pub fn encode_value(value: Value) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) => Value::String(value.to_string()),
        scalar => scalar,
    }
}

/// Encode every field of a partial record for storage.
pub fn encode_fields(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(name, value)| (name, encode_value(value)))
        .collect()
}

/// Deserialize a stored text field, tolerating values that were written
/// without encoding (arrays, objects, numbers) or as null.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Deserialize a stored number, reading numeric text as the number.
///
/// Anything else reads as zero.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        Value::Null => Some(0.0),
        _ => None,
    };
    Ok(number.unwrap_or_else(|| {
        debug!(stored = %value, "stored number is not numeric; reading as 0");
        0.0
    }))
}

/// Deserialize a stored flag, reading `"true"`/`"false"` text and 0/1.
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::String(text) => text.trim().eq_ignore_ascii_case("true"),
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    })
}
