//! Field extraction helpers shared by the response models.
//!
//! All helpers take the path of the value being read so that errors point
//! at the exact field that failed.

use crate::core::error::DeserializeError;
use crate::core::types::{MatchType, MediaClassification};

use serde_json::{Map, Value};

pub(crate) type Object = Map<String, Value>;

/// Requires `value` to be a JSON object.
pub(crate) fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Object, DeserializeError> {
    value
        .as_object()
        .ok_or_else(|| DeserializeError::invalid_type(path, "object", value))
}

/// Joins a parent path and a key into a child path.
pub(crate) fn child(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Returns the value under `key`, failing if the key is absent.
pub(crate) fn required<'a>(
    object: &'a Object,
    parent: &str,
    key: &str,
) -> Result<&'a Value, DeserializeError> {
    object
        .get(key)
        .ok_or_else(|| DeserializeError::missing(child(parent, key)))
}

/// Returns the string under `key`. Absent or null fails.
pub(crate) fn required_str<'a>(
    object: &'a Object,
    parent: &str,
    key: &str,
) -> Result<&'a str, DeserializeError> {
    match required(object, parent, key)? {
        Value::String(s) => Ok(s),
        Value::Null => Err(DeserializeError::missing(child(parent, key))),
        other => Err(DeserializeError::invalid_type(
            child(parent, key),
            "string",
            other,
        )),
    }
}

/// Returns the string under `key`. Absent and null both read as `None`.
pub(crate) fn optional_str<'a>(
    object: &'a Object,
    parent: &str,
    key: &str,
) -> Result<Option<&'a str>, DeserializeError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(DeserializeError::invalid_type(
            child(parent, key),
            "string or null",
            other,
        )),
    }
}

/// Reads a required `classification` token.
pub(crate) fn classification(
    object: &Object,
    parent: &str,
) -> Result<MediaClassification, DeserializeError> {
    let token = required_str(object, parent, "classification")?;
    token
        .parse()
        .map_err(|_| DeserializeError::unrecognized(child(parent, "classification"), token))
}

/// Reads an optional `match_type` token; absent or null means no match.
pub(crate) fn match_type(object: &Object, parent: &str) -> Result<Option<MatchType>, DeserializeError> {
    let token = optional_str(object, parent, "match_type")?;
    MatchType::from_wire(token)
        .map_err(|e| DeserializeError::unrecognized(child(parent, "match_type"), e.token))
}
