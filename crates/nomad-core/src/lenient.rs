//! # Lenient Field Deserializers
//!
//! NOMAD is an external service and its records are loosely typed. These
//! helpers are used with `#[serde(default, deserialize_with = "...")]` so that
//! a field with an unexpected shape collapses to `None` instead of failing the
//! whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Any JSON scalar as display text. `null` is absent; strings pass through;
/// numbers, booleans and nested values use their JSON text.
pub fn display_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(into_text))
}

/// A non-negative integer count. Anything else is absent.
pub fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_u64()))
}

/// An array of labels. Non-array values are absent; `null` items are dropped.
pub fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(items.into_iter().filter_map(into_text).collect()),
        _ => None,
    })
}

/// A nested object block. Non-object values, or objects that do not fit `T`,
/// are absent.
pub fn block<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(v @ Value::Object(_)) => serde_json::from_value(v).ok(),
        _ => None,
    })
}

/// An array of record rows. Each row that is a non-empty object and fits `T`
/// becomes `Some`; every other row (`null`, `{}`, scalars) becomes `None` in
/// place. A non-array value is absent.
pub fn rows<'de, D, T>(deserializer: D) -> Result<Option<Vec<Option<T>>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(items.into_iter().map(row).collect()),
        _ => None,
    })
}

fn row<T: DeserializeOwned>(value: Value) -> Option<T> {
    match value {
        Value::Object(map) if !map.is_empty() => serde_json::from_value(Value::Object(map)).ok(),
        _ => None,
    }
}

fn into_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

// =============================================================================
// TESTS
// =============================================================================
