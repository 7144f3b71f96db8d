//! Blocking Arachnid Shield client.
//!
//! Wraps the asynchronous [`crate::ArachnidShield`] and drives each call to
//! completion on a private current-thread runtime. Do not call these
//! methods from inside an async runtime; use the async client there.

use crate::client;
use crate::core::config::ShieldConfig;
use crate::core::error::ShieldError;
use crate::core::media::ScannedMedia;
use crate::core::pdq::ScannedPdqHashes;
use crate::transport::Transport;

use std::path::Path;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

/// Blocking client for the Arachnid Shield v1 API.
///
/// # Example
///
/// ```rust,no_run
/// use arachnid_shield::blocking::ArachnidShield;
/// use arachnid_shield::ShieldConfig;
///
/// let client = ArachnidShield::new(ShieldConfig::new("username", "password"))?;
/// let scanned = client.scan_pdq_hashes(&["aGFzaDE="])?;
/// for (hash, classification) in scanned.matching_hashes() {
///     println!("{hash}: {classification}");
/// }
/// # Ok::<(), arachnid_shield::ShieldError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ArachnidShield {
    inner: client::ArachnidShield,
    runtime: Arc<Runtime>,
}

impl ArachnidShield {
    /// Creates a client that talks HTTP to the configured API.
    pub fn new(config: ShieldConfig) -> Result<Self, ShieldError> {
        Self::from_async(client::ArachnidShield::new(config)?)
    }

    /// Creates a client from credentials in the environment.
    pub fn from_env() -> Result<Self, ShieldError> {
        Self::new(ShieldConfig::from_env()?)
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(transport: impl Transport + 'static) -> Result<Self, ShieldError> {
        Self::from_async(client::ArachnidShield::with_transport(transport))
    }

    /// Wraps an existing asynchronous client.
    pub fn from_async(inner: client::ArachnidShield) -> Result<Self, ShieldError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ShieldError::configuration(format!("Failed to create runtime: {}", e)))?;

        Ok(Self {
            inner,
            runtime: Arc::new(runtime),
        })
    }

    /// Scans media (image or video) from its raw bytes.
    pub fn scan_media_from_bytes(
        &self,
        content: impl Into<Vec<u8>>,
        mime_type: Option<&str>,
    ) -> Result<ScannedMedia, ShieldError> {
        self.runtime
            .block_on(self.inner.scan_media_from_bytes(content, mime_type))
    }

    /// Scans a local media file, sniffing its MIME type from the content.
    pub fn scan_media_from_file(&self, path: impl AsRef<Path>) -> Result<ScannedMedia, ShieldError> {
        self.runtime.block_on(self.inner.scan_media_from_file(path))
    }

    /// Scans media hosted at an absolute URL.
    pub fn scan_media_from_url(&self, url: &str) -> Result<ScannedMedia, ShieldError> {
        self.runtime.block_on(self.inner.scan_media_from_url(url))
    }

    /// Scans a batch of base64-encoded PDQ hashes.
    pub fn scan_pdq_hashes<S: AsRef<str>>(
        &self,
        hashes: &[S],
    ) -> Result<ScannedPdqHashes, ShieldError> {
        self.runtime.block_on(self.inner.scan_pdq_hashes(hashes))
    }
}
