//! Case-insensitive JSON decoding.
//!
//! The Epos Now API does not keep a stable field casing across endpoints
//! (`Id`, `ID`, `id`, `FirstName`, `first_name`, ...). Before handing a body to
//! serde, every object key is folded to a canonical form: ASCII lowercase with
//! `_` and `-` removed. Read models declare their deserialize names in that
//! folded form (see [`crate::models`]).
//!
//! Members whose value is `null` are dropped while folding, so a `null` from the
//! provider falls back to the field's default instead of failing the decode.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Folds a single object key: ASCII lowercase, `_` and `-` stripped.
pub fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Recursively folds every object key in `value`.
///
/// When two keys of the same object fold to the same name, the one appearing
/// later in the document wins.
pub fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut folded = Map::with_capacity(map.len());
            for (key, nested) in map {
                if nested.is_null() {
                    continue;
                }
                folded.insert(fold_key(&key), fold_keys(nested));
            }
            Value::Object(folded)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

/// Parses `body` and deserializes it into `T`, ignoring field-name casing.
pub fn from_str_case_insensitive<T>(body: &str) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned,
{
    let value: Value = serde_json::from_str(body)?;
    serde_json::from_value(fold_keys(value))
}

/// Like [`from_str_case_insensitive`], but an empty body or a literal `null`
/// decodes to `T::default()`.
pub fn from_str_or_default<T>(body: &str) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    if body.trim().is_empty() {
        return Ok(T::default());
    }

    let value: Value = serde_json::from_str(body)?;
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(fold_keys(value))
}
