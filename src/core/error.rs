//! Error types for the Arachnid Shield client.
//!
//! Every failure is returned as a `Result`; the client never panics and
//! never substitutes a default value for something it could not read.

use std::time::Duration;
use thiserror::Error;

/// The main error type for scan operations.
///
/// Errors abort the current call only. The client that produced them
/// stays usable for subsequent calls.
#[derive(Debug, Error)]
pub enum ShieldError {
    /// The connection to the API could not be established.
    #[error("connection to the Arachnid Shield API failed: {message}")]
    ConnectionFailed {
        /// Error message describing the failure.
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {elapsed:?}")]
    Timeout {
        /// The timeout that expired.
        elapsed: Duration,
    },

    /// Any other transport-level failure (TLS, protocol, body read).
    #[error("transport error: {message}")]
    Transport {
        /// Error message describing the failure.
        message: String,
    },

    /// The API answered with an HTTP status of 400 or above.
    #[error("API request failed with status {status}: {detail}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// The `detail` message from the error body.
        detail: String,
    },

    /// The API answered successfully but the body could not be understood.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] DeserializeError),

    /// The local media file does not exist.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// An I/O error occurred while reading local media.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The URL handed to a URL scan is not an absolute URL.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl ShieldError {
    /// Returns the HTTP status if this is an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the API `detail` message if this is an API error.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// Returns `true` if the API rejected the request with a status >= 400.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. } | Self::Timeout { .. } | Self::Transport { .. }
        )
    }

    /// Returns `true` if the API answered with a body that could not be deserialized.
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    /// Creates an `Api` error.
    pub fn api(status: u16, detail: impl Into<String>) -> Self {
        Self::Api {
            status,
            detail: detail.into(),
        }
    }

    /// Creates a `ConnectionFailed` error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            message: message.into(),
        }
    }

    /// Creates a `Transport` error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Error raised while turning a response payload into a typed model.
///
/// `field` is a path into the payload, e.g. `classification` or
/// `scanned_hashes["aGFzaDE="].classification`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeserializeError {
    /// The body is not valid JSON.
    #[error("response body is not valid JSON: {message}")]
    InvalidJson {
        /// Parser error message.
        message: String,
    },

    /// A required field is absent (or null where null is not allowed).
    #[error("missing required field '{field}'")]
    MissingField {
        /// Path of the missing field.
        field: String,
    },

    /// A field is present but has the wrong JSON shape.
    #[error("field '{field}' has invalid type: expected {expected}, found {found}")]
    InvalidType {
        /// Path of the offending field.
        field: String,
        /// Description of the expected shape.
        expected: &'static str,
        /// The raw value that was found.
        found: String,
    },

    /// An enumerant token outside the closed vocabulary.
    #[error("unrecognized value '{value}' for field '{field}'")]
    UnrecognizedValue {
        /// Path of the offending field.
        field: String,
        /// The raw token.
        value: String,
    },
}

impl DeserializeError {
    /// Returns the path of the offending field, if the error names one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidJson { .. } => None,
            Self::MissingField { field }
            | Self::InvalidType { field, .. }
            | Self::UnrecognizedValue { field, .. } => Some(field),
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid_type(
        field: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        Self::InvalidType {
            field: field.into(),
            expected,
            found: found.to_string(),
        }
    }

    pub(crate) fn unrecognized(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnrecognizedValue {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<serde_json::Error> for DeserializeError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson {
            message: err.to_string(),
        }
    }
}

/// A specialized `Result` type for client operations.
pub type ShieldResult<T> = Result<T, ShieldError>;
