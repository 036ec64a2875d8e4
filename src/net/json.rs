//! JSON helpers for loosely trusted backend payloads.
//!
//! The backend contract is only loosely trusted: fields may be missing, arrays
//! may arrive as objects or `null`, single records may be malformed. These
//! helpers turn such payloads into something usable instead of failing the
//! whole response.
//!
//! # Examples
//!
//! ```rust
//! use libris::net::json;
//! use serde_json::json;
//!
//! let data = json!({ "items": [{ "volumeInfo": { "title": "Dune" } }] });
//!
//! assert_eq!(json::extract_array(&data, "items").len(), 1);
//! assert!(json::extract_array(&data, "missing").is_empty());
//! assert!(json::array_or_empty(json!({ "oops": true })).is_empty());
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Extracts a value from nested JSON using dot notation.
///
/// Returns `None` if any part of the path doesn't exist.
///
/// # Examples
///
/// ```rust
/// use libris::net::json;
/// use serde_json::json;
///
/// let data = json!({ "volumeInfo": { "title": "Dune" } });
///
/// let title = json::extract_path(&data, "volumeInfo.title");
/// assert_eq!(title.and_then(|v| v.as_str()), Some("Dune"));
/// assert_eq!(json::extract_path(&data, "volumeInfo.authors"), None);
/// ```
pub fn extract_path<'a>(json: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = json;

    for key in path.split('.') {
        current = current.get(key)?;
    }

    Some(current)
}

/// Extracts an array from a nested JSON path.
///
/// Returns an empty vector if the path doesn't exist or doesn't point to an
/// array.
pub fn extract_array(json: &Value, path: &str) -> Vec<Value> {
    extract_path(json, path)
        .and_then(|v| v.as_array().cloned())
        .unwrap_or_default()
}

/// Returns the elements of `value` if it is an array, otherwise nothing.
///
/// `null`, objects and scalars all become an empty vector.
pub fn array_or_empty(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => {
            if !other.is_null() {
                warn!(kind = kind_of(&other), "expected a JSON array, discarding payload");
            }
            Vec::new()
        }
    }
}

/// Deserializes each element, skipping (and logging) the ones that don't fit `T`.
pub fn decode_each<T>(items: Vec<Value>, what: &str) -> Vec<T>
where
    T: DeserializeOwned,
{
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed {}", what);
                None
            }
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WishlistItem;
    use serde_json::json;

    #[test]
    fn test_array_or_empty_non_arrays() {
        assert!(array_or_empty(Value::Null).is_empty());
        assert!(array_or_empty(json!({ "title": "Dune" })).is_empty());
        assert!(array_or_empty(json!("Dune")).is_empty());
        assert_eq!(array_or_empty(json!([1, 2])).len(), 2);
    }

    #[test]
    fn test_decode_each_skips_malformed() {
        let items = vec![
            json!({ "title": "Dune", "authors": "Frank Herbert" }),
            json!({ "authors": "no title here" }),
            json!(42),
        ];
        let decoded: Vec<WishlistItem> = decode_each(items, "wishlist item");
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].title, "Dune");
    }
}
