//! reqwest-backed transport.
//!
//! Holds a single `reqwest::Client` configured with the base URL, Basic
//! credentials, user agent and timeout. The client is built once and only
//! read afterwards.

use crate::core::config::ShieldConfig;
use crate::core::error::ShieldError;
use crate::transport::{Transport, TransportRequest, TransportResponse};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Production transport over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Builds a transport from the given configuration.
    pub fn new(config: &ShieldConfig) -> Result<Self, ShieldError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, basic_auth(config)?);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| {
                ShieldError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_error(&self, err: reqwest::Error) -> ShieldError {
        if err.is_timeout() {
            ShieldError::Timeout {
                elapsed: self.timeout,
            }
        } else if err.is_connect() {
            ShieldError::connection_failed(err.to_string())
        } else {
            ShieldError::transport(err.to_string())
        }
    }
}

fn basic_auth(config: &ShieldConfig) -> Result<HeaderValue, ShieldError> {
    let credentials = format!(
        "{}:{}",
        config.username,
        config.password.expose_secret()
    );
    let mut value = HeaderValue::from_str(&format!("Basic {}", STANDARD.encode(credentials)))
        .map_err(|_| ShieldError::configuration("credentials contain invalid header characters"))?;
    value.set_sensitive(true);
    Ok(value)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ShieldError> {
        let url = format!("{}{}", self.base_url, request.endpoint.path());

        let mut builder = self.client.request(request.method, &url);
        if let Some(content_type) = &request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        Ok(TransportResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}
