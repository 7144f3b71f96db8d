//! Result of scanning a single image or video.

use crate::core::error::DeserializeError;
use crate::core::payload;
use crate::core::types::{MatchType, MediaClassification};

use serde::Serialize;
use serde_json::Value;

/// An opaque record describing a visually similar item in the database.
///
/// The client does not interpret these; they are passed through as
/// received.
pub type NearMatchDetail = Value;

/// A record of media that has been scanned by the Arachnid Shield API,
/// together with any classification found for it.
///
/// Instances only come from deserializing a successful API response and
/// cannot be modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScannedMedia {
    size_bytes: u64,
    near_match_details: Vec<NearMatchDetail>,
    match_type: Option<MatchType>,
    classification: MediaClassification,
    sha1_base32: String,
    sha256_hex: String,
}

impl ScannedMedia {
    /// Deserializes a scanned-media payload.
    ///
    /// # Errors
    ///
    /// Fails on a missing key, a value of the wrong shape, or an
    /// unrecognized `match_type`/`classification` token. No partial
    /// value is ever returned.
    pub fn from_value(value: &Value) -> Result<Self, DeserializeError> {
        let object = payload::as_object(value, "")?;

        let size_value = payload::required(object, "", "size_bytes")?;
        let size_bytes = size_value.as_u64().ok_or_else(|| {
            DeserializeError::invalid_type("size_bytes", "non-negative integer", size_value)
        })?;

        let details_value = payload::required(object, "", "near_match_details")?;
        let near_match_details = details_value
            .as_array()
            .ok_or_else(|| {
                DeserializeError::invalid_type("near_match_details", "array", details_value)
            })?
            .clone();

        let match_type = payload::match_type(object, "")?;
        let classification = payload::classification(object, "")?;

        Ok(Self {
            size_bytes,
            near_match_details,
            match_type,
            classification,
            sha1_base32: payload::required_str(object, "", "sha1_base32")?.to_string(),
            sha256_hex: payload::required_str(object, "", "sha256_hex")?.to_string(),
        })
    }

    /// Parses raw response bytes and deserializes them.
    pub fn from_slice(body: &[u8]) -> Result<Self, DeserializeError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(&value)
    }

    /// Total size, in bytes, of the scanned media.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Visually similar items found in the database.
    pub fn near_match_details(&self) -> &[NearMatchDetail] {
        &self.near_match_details
    }

    /// How the match was established, or `None` when nothing matched.
    ///
    /// The API is expected to return `None` exactly when the classification
    /// is `NoKnownMatch`; the client reports whatever was received.
    pub fn match_type(&self) -> Option<MatchType> {
        self.match_type
    }

    /// Classification of the matched media.
    pub fn classification(&self) -> MediaClassification {
        self.classification
    }

    /// Base-32 SHA1 digest of the scanned bytes.
    pub fn sha1_base32(&self) -> &str {
        &self.sha1_base32
    }

    /// Hexadecimal SHA256 digest of the scanned bytes.
    pub fn sha256_hex(&self) -> &str {
        &self.sha256_hex
    }

    /// Returns `true` if the media matched known CSAM or harmful content.
    pub fn matches_known_media(&self) -> bool {
        self.classification.is_known_match()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(classification: &str, match_type: Value) -> Value {
        json!({
            "size_bytes": 1024,
            "near_match_details": [],
            "match_type": match_type,
            "classification": classification,
            "sha1_base32": "ABC",
            "sha256_hex": "def",
        })
    }

    #[test]
    fn test_no_known_match() {
        let media = ScannedMedia::from_value(&payload("no-known-match", Value::Null)).unwrap();

        assert_eq!(media.size_bytes(), 1024);
        assert!(media.near_match_details().is_empty());
        assert_eq!(media.match_type(), None);
        assert_eq!(media.classification(), MediaClassification::NoKnownMatch);
        assert_eq!(media.sha1_base32(), "ABC");
        assert_eq!(media.sha256_hex(), "def");
        assert!(!media.matches_known_media());
    }

    #[test]
    fn test_matches_known_media_for_every_classification() {
        for classification in MediaClassification::ALL {
            let media =
                ScannedMedia::from_value(&payload(classification.as_str(), json!("exact")))
                    .unwrap();
            assert_eq!(
                media.matches_known_media(),
                classification != MediaClassification::NoKnownMatch
            );
        }
    }

    #[test]
    fn test_near_match_details_pass_through() {
        let mut value = payload("csam", json!("near"));
        value["near_match_details"] = json!([
            {"sha1_base32": "XYZ", "classification": "csam", "timestamp": 12.5},
            {"anything": ["goes", 1, null]}
        ]);

        let media = ScannedMedia::from_value(&value).unwrap();
        assert_eq!(media.match_type(), Some(MatchType::Near));
        assert_eq!(media.near_match_details().len(), 2);
        assert_eq!(media.near_match_details()[0]["sha1_base32"], "XYZ");
        assert_eq!(media.near_match_details()[1], json!({"anything": ["goes", 1, null]}));
    }

    #[test]
    fn test_unknown_classification_fails() {
        let err = ScannedMedia::from_value(&payload("unknown-future-category", Value::Null))
            .unwrap_err();
        assert_eq!(
            err,
            DeserializeError::UnrecognizedValue {
                field: "classification".into(),
                value: "unknown-future-category".into(),
            }
        );
    }

    #[test]
    fn test_null_classification_fails() {
        let mut value = payload("csam", json!("exact"));
        value["classification"] = Value::Null;
        assert_eq!(
            ScannedMedia::from_value(&value),
            Err(DeserializeError::missing("classification"))
        );
    }

    #[test]
    fn test_unknown_match_type_fails() {
        let err = ScannedMedia::from_value(&payload("csam", json!("photodna"))).unwrap_err();
        assert_eq!(err.field(), Some("match_type"));
    }

    #[test]
    fn test_missing_and_mistyped_fields() {
        for key in [
            "size_bytes",
            "near_match_details",
            "classification",
            "sha1_base32",
            "sha256_hex",
        ] {
            let mut value = payload("csam", json!("exact"));
            value.as_object_mut().unwrap().remove(key);
            assert_eq!(
                ScannedMedia::from_value(&value),
                Err(DeserializeError::missing(key)),
                "removing {key}"
            );
        }

        let mut no_match_type = payload("no-known-match", json!(null));
        no_match_type.as_object_mut().unwrap().remove("match_type");
        let scanned = ScannedMedia::from_value(&no_match_type).unwrap();
        assert_eq!(scanned.match_type(), None);
        assert!(!scanned.matches_known_media());

        let mut negative = payload("csam", json!("exact"));
        negative["size_bytes"] = json!(-1);
        assert!(matches!(
            ScannedMedia::from_value(&negative),
            Err(DeserializeError::InvalidType { ref field, .. }) if field == "size_bytes"
        ));

        let mut details = payload("csam", json!("exact"));
        details["near_match_details"] = json!({"not": "a list"});
        assert!(matches!(
            ScannedMedia::from_value(&details),
            Err(DeserializeError::InvalidType { expected: "array", .. })
        ));

        assert!(matches!(
            ScannedMedia::from_value(&json!(["not", "an", "object"])),
            Err(DeserializeError::InvalidType { expected: "object", .. })
        ));
    }

    #[test]
    fn test_from_slice() {
        let body = br#"{"size_bytes":1024,"near_match_details":[],"match_type":null,"classification":"no-known-match","sha1_base32":"ABC","sha256_hex":"def"}"#;
        let media = ScannedMedia::from_slice(body).unwrap();
        assert!(!media.matches_known_media());

        assert!(matches!(
            ScannedMedia::from_slice(b"<html>"),
            Err(DeserializeError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_deserialization_is_deterministic() {
        let value = payload("harmful-to-children", json!("exact"));
        let first = ScannedMedia::from_value(&value).unwrap();
        let _ = ScannedMedia::from_value(&payload("csam", json!("near"))).unwrap();
        let second = ScannedMedia::from_value(&value).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serializes_to_wire_shape() {
        let value = payload("csam", json!("exact"));
        let media = ScannedMedia::from_value(&value).unwrap();
        assert_eq!(serde_json::to_value(&media).unwrap(), value);
    }
}
