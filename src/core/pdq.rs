//! Result of a batch PDQ hash scan.

use crate::core::error::DeserializeError;
use crate::core::payload;
use crate::core::types::MediaClassification;

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// A batch of PDQ hashes scanned by the Arachnid Shield API, with the
/// classification found for each hash.
///
/// Keys are the base64 PDQ hashes exactly as the API returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScannedPdqHashes {
    scanned_hashes: HashMap<String, MediaClassification>,
}

impl ScannedPdqHashes {
    /// Deserializes a `{"scanned_hashes": {...}}` payload.
    ///
    /// # Errors
    ///
    /// A single entry that is malformed or carries an unrecognized
    /// classification fails the whole batch; the error names the hash.
    pub fn from_value(value: &Value) -> Result<Self, DeserializeError> {
        let object = payload::as_object(value, "")?;
        let entries = payload::as_object(
            payload::required(object, "", "scanned_hashes")?,
            "scanned_hashes",
        )?;

        let mut scanned_hashes = HashMap::with_capacity(entries.len());
        for (hash, entry) in entries {
            let path = format!("scanned_hashes[{hash:?}]");
            let entry = payload::as_object(entry, &path)?;
            let classification = payload::classification(entry, &path)?;
            scanned_hashes.insert(hash.clone(), classification);
        }

        Ok(Self { scanned_hashes })
    }

    /// Parses raw response bytes and deserializes them.
    pub fn from_slice(body: &[u8]) -> Result<Self, DeserializeError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(&value)
    }

    /// All results keyed by base64 PDQ hash.
    pub fn scanned_hashes(&self) -> &HashMap<String, MediaClassification> {
        &self.scanned_hashes
    }

    /// Returns the classification for one hash, if it was part of the batch.
    pub fn classification(&self, hash: &str) -> Option<MediaClassification> {
        self.scanned_hashes.get(hash).copied()
    }

    /// Number of hashes in the result.
    pub fn len(&self) -> usize {
        self.scanned_hashes.len()
    }

    /// Returns `true` if the result holds no hashes.
    pub fn is_empty(&self) -> bool {
        self.scanned_hashes.is_empty()
    }

    /// Iterates over `(hash, classification)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, MediaClassification)> {
        self.scanned_hashes.iter().map(|(h, c)| (h.as_str(), *c))
    }

    /// Iterates over the hashes that matched known media.
    pub fn matching_hashes(&self) -> impl Iterator<Item = (&str, MediaClassification)> {
        self.iter().filter(|(_, c)| c.is_known_match())
    }

    /// Returns `true` if any hash in the batch matched known media.
    pub fn matches_known_media(&self) -> bool {
        self.scanned_hashes.values().any(MediaClassification::is_known_match)
    }

    /// Consumes the result and returns the underlying map.
    pub fn into_inner(self) -> HashMap<String, MediaClassification> {
        self.scanned_hashes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_two_hashes() {
        let value = json!({
            "scanned_hashes": {
                "aGFzaDE=": {"classification": "csam"},
                "aGFzaDI=": {"classification": "no-known-match"}
            }
        });

        let result = ScannedPdqHashes::from_value(&value).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.classification("aGFzaDE="), Some(MediaClassification::Csam));
        assert_eq!(
            result.classification("aGFzaDI="),
            Some(MediaClassification::NoKnownMatch)
        );
        assert_eq!(result.classification("aGFzaDM="), None);
        assert!(result.matches_known_media());

        let matching: Vec<_> = result.matching_hashes().collect();
        assert_eq!(matching, vec![("aGFzaDE=", MediaClassification::Csam)]);
    }

    #[test]
    fn test_extra_entry_fields_are_ignored() {
        let value = json!({
            "scanned_hashes": {
                "aGFzaDE=": {"classification": "harmful-to-children", "match_type": "near"}
            }
        });
        let result = ScannedPdqHashes::from_value(&value).unwrap();
        assert_eq!(
            result.classification("aGFzaDE="),
            Some(MediaClassification::HarmfulToChildren)
        );
    }

    #[test]
    fn test_empty_batch() {
        let result = ScannedPdqHashes::from_value(&json!({"scanned_hashes": {}})).unwrap();
        assert!(result.is_empty());
        assert!(!result.matches_known_media());
    }

    #[test]
    fn test_one_unknown_classification_fails_whole_batch() {
        let value = json!({
            "scanned_hashes": {
                "aGFzaDE=": {"classification": "csam"},
                "aGFzaDI=": {"classification": "unknown-future-category"},
                "aGFzaDM=": {"classification": "no-known-match"}
            }
        });

        let err = ScannedPdqHashes::from_value(&value).unwrap_err();
        assert_eq!(
            err,
            DeserializeError::UnrecognizedValue {
                field: "scanned_hashes[\"aGFzaDI=\"].classification".into(),
                value: "unknown-future-category".into(),
            }
        );
    }

    #[test]
    fn test_malformed_entries() {
        assert_eq!(
            ScannedPdqHashes::from_value(&json!({})),
            Err(DeserializeError::missing("scanned_hashes"))
        );

        assert!(matches!(
            ScannedPdqHashes::from_value(&json!({"scanned_hashes": ["aGFzaDE="]})),
            Err(DeserializeError::InvalidType { expected: "object", .. })
        ));

        let err = ScannedPdqHashes::from_value(&json!({
            "scanned_hashes": {"aGFzaDE=": {}}
        }))
        .unwrap_err();
        assert_eq!(err.field(), Some("scanned_hashes[\"aGFzaDE=\"].classification"));

        let err = ScannedPdqHashes::from_value(&json!({
            "scanned_hashes": {"aGFzaDE=": "csam"}
        }))
        .unwrap_err();
        assert_eq!(err.field(), Some("scanned_hashes[\"aGFzaDE=\"]"));
    }

    #[test]
    fn test_duplicate_keys_keep_last() {
        let body = br#"{"scanned_hashes": {
            "aGFzaDE=": {"classification": "csam"},
            "aGFzaDE=": {"classification": "no-known-match"}
        }}"#;
        let result = ScannedPdqHashes::from_slice(body).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.classification("aGFzaDE="),
            Some(MediaClassification::NoKnownMatch)
        );
    }

    #[test]
    fn test_deserialization_is_deterministic() {
        let value = json!({
            "scanned_hashes": {
                "b": {"classification": "csam"},
                "a": {"classification": "harmful-to-children"}
            }
        });
        let first = ScannedPdqHashes::from_value(&value).unwrap();
        let second = ScannedPdqHashes::from_value(&value).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.into_inner().len(), 2);
    }
}
