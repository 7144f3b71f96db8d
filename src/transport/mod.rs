//! HTTP transport abstraction.
//!
//! The client facades never talk to the network directly; they hand a
//! [`TransportRequest`] to a [`Transport`] and route whatever comes back.
//!
//! ## Available Transports
//!
//! - [`http`] - reqwest-backed transport used in production
//! - [`mock`] - scripted in-memory transport for tests
//!
//! ## Implementing a Custom Transport
//!
//! ```rust,ignore
//! use arachnid_shield::transport::{Transport, TransportRequest, TransportResponse};
//! use arachnid_shield::ShieldError;
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! pub struct RecordingTransport;
//!
//! #[async_trait]
//! impl Transport for RecordingTransport {
//!     async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ShieldError> {
//!         todo!()
//!     }
//! }
//! ```

pub mod http;
pub mod mock;

pub use http::HttpTransport;
pub use mock::MockTransport;

use crate::core::error::ShieldError;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use std::fmt::{self, Debug};

/// Content type of JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// API endpoints, relative to the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Raw media upload.
    Media,
    /// Media hosted at a URL.
    Url,
    /// Batch of PDQ hashes.
    Pdq,
}

impl Endpoint {
    /// Returns the request path.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Media => "/v1/media/",
            Self::Url => "/v1/url/",
            Self::Pdq => "/v1/pdq/",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A request ready to be sent.
#[derive(Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Target endpoint.
    pub endpoint: Endpoint,
    /// `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Request body.
    pub body: Vec<u8>,
}

impl TransportRequest {
    /// Creates a POST request to the given endpoint.
    pub fn post(endpoint: Endpoint, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method: Method::POST,
            endpoint,
            content_type: None,
            body: body.into(),
        }
    }

    /// Sets the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl Debug for TransportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportRequest")
            .field("method", &self.method)
            .field("endpoint", &self.endpoint)
            .field("content_type", &self.content_type)
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// A fully received response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Complete response body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Creates a response with no headers.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Returns `true` if the status is 400 or above.
    pub fn is_error(&self) -> bool {
        self.status.as_u16() >= 400
    }
}

/// Sends requests to the Arachnid Shield API.
///
/// Implementations must be `Send + Sync`, perform exactly one exchange per
/// call, and never retry. Any status code is a successful exchange; only
/// failures to obtain a response are errors.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Sends the request and reads the whole response.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ShieldError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Media.path(), "/v1/media/");
        assert_eq!(Endpoint::Url.path(), "/v1/url/");
        assert_eq!(Endpoint::Pdq.to_string(), "/v1/pdq/");
    }

    #[test]
    fn test_request_builder() {
        let request = TransportRequest::post(Endpoint::Url, b"{}".to_vec())
            .with_content_type(JSON_CONTENT_TYPE);
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.content_type.as_deref(), Some("application/json"));
        assert!(format!("{request:?}").contains("body_len: 2"));
    }

    #[test]
    fn test_response_is_error() {
        assert!(!TransportResponse::new(StatusCode::OK, Vec::new()).is_error());
        assert!(!TransportResponse::new(StatusCode::PERMANENT_REDIRECT, Vec::new()).is_error());
        assert!(TransportResponse::new(StatusCode::BAD_REQUEST, Vec::new()).is_error());
        assert!(TransportResponse::new(StatusCode::BAD_GATEWAY, Vec::new()).is_error());
    }
}
