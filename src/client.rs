//! Asynchronous Arachnid Shield client.
//!
//! Every operation follows the same pipeline: build a request, send it
//! through the [`Transport`], then route the response. A status of 400 or
//! above becomes [`ShieldError::Api`]; anything else is handed to the
//! deserializer of the operation's result type.

use crate::core::config::ShieldConfig;
use crate::core::error::{DeserializeError, ShieldError};
use crate::core::media::ScannedMedia;
use crate::core::mime;
use crate::core::pdq::ScannedPdqHashes;
use crate::transport::{
    Endpoint, HttpTransport, Transport, TransportRequest, TransportResponse, JSON_CONTENT_TYPE,
};

use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

/// Client for the Arachnid Shield v1 API.
///
/// Cloning is cheap and clones share the underlying transport. The client
/// holds no mutable state, so concurrent calls are independent.
///
/// # Example
///
/// ```rust,no_run
/// use arachnid_shield::{ArachnidShield, ShieldConfig};
///
/// # async fn run() -> Result<(), arachnid_shield::ShieldError> {
/// let client = ArachnidShield::new(ShieldConfig::new("username", "password"))?;
/// let scanned = client.scan_media_from_url("https://example.com/image.jpg").await?;
/// if scanned.matches_known_media() {
///     println!("matched: {}", scanned.classification());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ArachnidShield {
    transport: Arc<dyn Transport>,
}

impl ArachnidShield {
    /// Creates a client that talks HTTP to the configured API.
    pub fn new(config: ShieldConfig) -> Result<Self, ShieldError> {
        Ok(Self::with_transport(HttpTransport::new(&config)?))
    }

    /// Creates a client from credentials in the environment.
    pub fn from_env() -> Result<Self, ShieldError> {
        Self::new(ShieldConfig::from_env()?)
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Creates a client over a shared transport.
    pub fn with_shared_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Scans media (image or video) from its raw bytes.
    ///
    /// `mime_type` is sent as the `Content-Type`; when `None` the header is
    /// left unset.
    pub async fn scan_media_from_bytes(
        &self,
        content: impl Into<Vec<u8>>,
        mime_type: Option<&str>,
    ) -> Result<ScannedMedia, ShieldError> {
        let mut request = TransportRequest::post(Endpoint::Media, content);
        if let Some(mime_type) = mime_type {
            request = request.with_content_type(mime_type);
        }
        let response = self.execute(request).await?;
        route_response(response, ScannedMedia::from_value)
    }

    /// Scans a local media file.
    ///
    /// The whole file is read into memory in a single pass and the same
    /// buffer is sent as the request body, so a file of N bytes costs an
    /// N-byte allocation. The MIME type is sniffed from the leading bytes and
    /// defaults to `application/octet-stream`.
    ///
    /// A missing file fails with [`ShieldError::FileNotFound`] before any
    /// request is sent.
    pub async fn scan_media_from_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<ScannedMedia, ShieldError> {
        let content = read_file(path.as_ref()).await?;
        let mime_type = mime::detect_or_default(&content);
        self.scan_media_from_bytes(content, Some(mime_type)).await
    }

    /// Scans media hosted at an absolute URL.
    pub async fn scan_media_from_url(&self, url: &str) -> Result<ScannedMedia, ShieldError> {
        validate_url(url)?;
        let request = json_request(Endpoint::Url, json!({ "url": url }));
        let response = self.execute(request).await?;
        route_response(response, ScannedMedia::from_value)
    }

    /// Scans a batch of base64-encoded PDQ hashes.
    pub async fn scan_pdq_hashes<S: AsRef<str>>(
        &self,
        hashes: &[S],
    ) -> Result<ScannedPdqHashes, ShieldError> {
        let hashes: Vec<&str> = hashes.iter().map(AsRef::as_ref).collect();
        let request = json_request(Endpoint::Pdq, json!({ "hashes": hashes }));
        let response = self.execute(request).await?;
        route_response(response, ScannedPdqHashes::from_value)
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, ShieldError> {
        let endpoint = request.endpoint;
        tracing::debug!(
            endpoint = %endpoint,
            body_len = request.body.len(),
            content_type = request.content_type.as_deref().unwrap_or("-"),
            "Sending scan request"
        );

        let response = self.transport.send(request).await?;

        tracing::debug!(
            endpoint = %endpoint,
            status = response.status.as_u16(),
            body_len = response.body.len(),
            "Received scan response"
        );
        Ok(response)
    }
}

fn json_request(endpoint: Endpoint, body: Value) -> TransportRequest {
    TransportRequest::post(endpoint, body.to_string().into_bytes())
        .with_content_type(JSON_CONTENT_TYPE)
}

async fn read_file(path: &Path) -> Result<Vec<u8>, ShieldError> {
    tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ShieldError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => ShieldError::Io(e),
    })
}

fn validate_url(url: &str) -> Result<(), ShieldError> {
    let invalid = |reason: String| ShieldError::InvalidUrl {
        url: url.to_string(),
        reason,
    };
    let parsed = reqwest::Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    if parsed.cannot_be_a_base() {
        return Err(invalid("URL must be hierarchical, e.g. https://host/path".to_string()));
    }
    Ok(())
}

/// Routes a raw response to an API error or to `deserialize`.
///
/// The body is parsed as JSON first. For error statuses the `detail` field
/// becomes the error message; a body without one falls back to its raw
/// text, or to the status reason when empty.
pub(crate) fn route_response<T>(
    response: TransportResponse,
    deserialize: impl FnOnce(&Value) -> Result<T, DeserializeError>,
) -> Result<T, ShieldError> {
    let parsed = serde_json::from_slice::<Value>(&response.body);

    if response.is_error() {
        let status = response.status.as_u16();
        let detail = match parsed.as_ref().ok().and_then(|v| v.get("detail")) {
            Some(Value::String(detail)) => detail.clone(),
            Some(Value::Null) | None => fallback_detail(&response),
            Some(other) => other.to_string(),
        };
        return Err(ShieldError::Api { status, detail });
    }

    let value = parsed.map_err(DeserializeError::from)?;
    deserialize(&value).map_err(ShieldError::from)
}

fn fallback_detail(response: &TransportResponse) -> String {
    let text = String::from_utf8_lossy(&response.body);
    let text = text.trim();
    if text.is_empty() {
        response
            .status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MediaClassification;
    use reqwest::StatusCode;
    use serde_json::json;

    fn response(status: u16, body: &str) -> TransportResponse {
        TransportResponse::new(StatusCode::from_u16(status).unwrap(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_route_success() {
        let body = json!({"scanned_hashes": {"aGFzaDE=": {"classification": "csam"}}});
        let result =
            route_response(response(200, &body.to_string()), ScannedPdqHashes::from_value)
                .unwrap();
        assert_eq!(result.classification("aGFzaDE="), Some(MediaClassification::Csam));
    }

    #[test]
    fn test_route_api_error_detail() {
        let err = route_response(
            response(422, r#"{"detail": "invalid hash length"}"#),
            ScannedPdqHashes::from_value,
        )
        .unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.detail(), Some("invalid hash length"));
    }

    #[test]
    fn test_route_api_error_structured_detail() {
        let err = route_response(
            response(422, r#"{"detail": [{"loc": ["body", "url"], "msg": "field required"}]}"#),
            ScannedMedia::from_value,
        )
        .unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert!(err.detail().unwrap().contains("field required"));
    }

    #[test]
    fn test_route_api_error_without_json() {
        let err = route_response(response(502, "Bad Gateway from proxy"), ScannedMedia::from_value)
            .unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.detail(), Some("Bad Gateway from proxy"));

        let err = route_response(response(401, ""), ScannedMedia::from_value).unwrap_err();
        assert_eq!(err.detail(), Some("Unauthorized"));
    }

    #[test]
    fn test_route_success_with_invalid_json() {
        let err = route_response(response(200, "<html>"), ScannedMedia::from_value).unwrap_err();
        assert!(matches!(
            err,
            ShieldError::MalformedResponse(DeserializeError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/image.jpg").is_ok());
        assert!(matches!(
            validate_url("example.com/image.jpg"),
            Err(ShieldError::InvalidUrl { .. })
        ));
        assert!(validate_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_json_request_bodies() {
        let hashes = vec!["aGFzaDE=", "aGFzaDI="];
        let request = json_request(Endpoint::Pdq, json!({ "hashes": hashes }));
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body, json!({"hashes": ["aGFzaDE=", "aGFzaDI="]}));
        assert_eq!(request.content_type.as_deref(), Some(JSON_CONTENT_TYPE));

        let request = json_request(Endpoint::Url, json!({ "url": "https://example.com/\"q\"" }));
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["url"], "https://example.com/\"q\"");
        assert_eq!(request.endpoint, Endpoint::Url);
    }
}
