//! Tolerant decoding for lists we do not control (model answers, old blobs).
//!
//! `null` or any non-array becomes an empty list, and elements that do not
//! decode are dropped. Combine with `#[serde(default)]` so a missing key is
//! covered too.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `deserialize_with` target for `Vec<T>` fields.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(items_of(&value))
}

pub fn items_of<T: DeserializeOwned>(value: &Value) -> Vec<T> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| T::deserialize(item).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Answer {
        #[serde(deserialize_with = "list")]
        tags: Vec<String>,
        title: String,
    }

    #[test]
    fn test_null_and_non_array_become_empty() {
        let a: Answer = serde_json::from_value(json!({"tags": null, "title": "x"})).unwrap();
        assert!(a.tags.is_empty());
        assert_eq!(a.title, "x");

        let a: Answer = serde_json::from_value(json!({"tags": "R, I"})).unwrap();
        assert!(a.tags.is_empty());

        let a: Answer = serde_json::from_value(json!({})).unwrap();
        assert!(a.tags.is_empty());
    }

    #[test]
    fn test_malformed_elements_are_dropped() {
        let a: Answer = serde_json::from_value(json!({"tags": ["R", 3, null, "I"]})).unwrap();
        assert_eq!(a.tags, vec!["R", "I"]);
    }
}
