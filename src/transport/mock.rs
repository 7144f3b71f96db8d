//! Mock transport for testing.
//!
//! Replies are scripted up front and handed out in order, one per request.
//! Every request is recorded so tests can assert on what was sent.

use crate::core::error::ShieldError;
use crate::transport::{Transport, TransportRequest, TransportResponse};

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone)]
enum MockReply {
    Response(TransportResponse),
    ConnectionFailed(String),
    Timeout(Duration),
}

/// A scripted transport for tests.
///
/// # Examples
///
/// ```rust
/// use arachnid_shield::transport::MockTransport;
/// use serde_json::json;
///
/// let transport = MockTransport::new()
///     .with_json(200, json!({"scanned_hashes": {}}))
///     .with_json(422, json!({"detail": "invalid hash length"}));
/// assert_eq!(transport.pending(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<TransportRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    /// Creates a transport with no replies queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn with_response(self, response: TransportResponse) -> Self {
        self.push(MockReply::Response(response));
        self
    }

    /// Queues a response with a raw body.
    ///
    /// # Panics
    ///
    /// Panics if `status` is not a valid HTTP status code.
    pub fn with_body(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        let status = StatusCode::from_u16(status).expect("invalid status code");
        self.with_response(TransportResponse::new(status, body))
    }

    /// Queues a response with a JSON body.
    pub fn with_json(self, status: u16, body: serde_json::Value) -> Self {
        self.with_body(status, body.to_string())
    }

    /// Queues a connection failure.
    pub fn with_connection_failure(self, message: impl Into<String>) -> Self {
        self.push(MockReply::ConnectionFailed(message.into()));
        self
    }

    /// Queues a timeout.
    pub fn with_timeout(self, elapsed: Duration) -> Self {
        self.push(MockReply::Timeout(elapsed));
        self
    }

    /// Returns every request received so far, oldest first.
    pub fn requests(&self) -> Vec<TransportRequest> {
        lock(&self.requests).clone()
    }

    /// Returns the number of requests received.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Returns the number of replies not yet consumed.
    pub fn pending(&self) -> usize {
        lock(&self.replies).len()
    }

    fn push(&self, reply: MockReply) {
        lock(&self.replies).push_back(reply);
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ShieldError> {
        let endpoint = request.endpoint;
        lock(&self.requests).push(request);

        match lock(&self.replies).pop_front() {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::ConnectionFailed(message)) => {
                Err(ShieldError::connection_failed(message))
            }
            Some(MockReply::Timeout(elapsed)) => Err(ShieldError::Timeout { elapsed }),
            None => Err(ShieldError::transport(format!(
                "mock transport has no reply queued for {endpoint}"
            ))),
        }
    }
}
