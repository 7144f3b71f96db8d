//! Client configuration.

use crate::core::error::ShieldError;

use secrecy::SecretString;
use std::time::Duration;

/// Production address of the Arachnid Shield API.
pub const DEFAULT_BASE_URL: &str = "https://shield.projectarachnid.com";

/// Timeout applied to each request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the API username.
pub const ENV_USERNAME: &str = "ARACHNID_SHIELD_USERNAME";
/// Environment variable holding the API password.
pub const ENV_PASSWORD: &str = "ARACHNID_SHIELD_PASSWORD";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "ARACHNID_SHIELD_URL";

/// Arachnid Shield client configuration.
///
/// Set once at construction and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ShieldConfig {
    /// API username.
    pub username: String,

    /// API password (kept secret).
    pub password: SecretString,

    /// Base address of the API, without the `/v1` prefix.
    pub base_url: String,

    /// Request timeout.
    pub timeout: Duration,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl ShieldConfig {
    /// Creates a new configuration with the given credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into().into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("arachnid-shield-rust/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Reads credentials (and optionally the base URL) from the environment.
    pub fn from_env() -> Result<Self, ShieldError> {
        let read = |name: &str| {
            std::env::var(name).map_err(|_| {
                ShieldError::configuration(format!("environment variable {name} is not set"))
            })
        };

        let config = Self::new(read(ENV_USERNAME)?, read(ENV_PASSWORD)?);
        Ok(match std::env::var(ENV_BASE_URL) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(url),
            _ => config,
        })
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Checks the configuration for values no request could succeed with.
    pub fn validate(&self) -> Result<(), ShieldError> {
        if self.username.is_empty() {
            return Err(ShieldError::configuration("username must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(ShieldError::configuration("timeout must be greater than zero"));
        }
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            ShieldError::configuration(format!("invalid base URL '{}': {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ShieldError::configuration(format!(
                "base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(())
    }
}
