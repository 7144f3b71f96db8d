//! # Arachnid Shield
//!
//! A client for the Arachnid Shield API, which checks images and videos
//! against a database of known child sexual abuse material (CSAM) and
//! content harmful to children.
//!
//! ## Overview
//!
//! Media can be submitted four ways:
//!
//! - Raw bytes, with an optional MIME type
//! - A local file, whose MIME type is sniffed from its content
//! - A URL the API fetches itself
//! - A batch of base64-encoded PDQ perceptual hashes
//!
//! Responses are validated strictly. A classification or match type the
//! client does not recognize fails the call instead of being mapped to a
//! known value, so an unknown category can never be mistaken for
//! `NoKnownMatch`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use arachnid_shield::{ArachnidShield, ShieldConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ArachnidShield::new(ShieldConfig::new("username", "password"))?;
//!
//!     let scanned = client.scan_media_from_file("upload.jpg").await?;
//!     if scanned.matches_known_media() {
//!         println!("Blocked: {}", scanned.classification());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `default` - `rustls-tls` and `blocking`
//! - `rustls-tls` - HTTPS via rustls
//! - `native-tls` - HTTPS via the platform TLS library
//! - `blocking` - A synchronous client in [`blocking`]
//!
//! ## Architecture
//!
//! - **Core**: Classification vocabularies, response models, errors, configuration
//! - **Transport**: The HTTP seam, with a reqwest implementation and a mock
//! - **Client**: The async facade that routes responses to the models
//! - **Blocking**: A synchronous wrapper over the async facade

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

#[cfg(feature = "blocking")]
pub mod blocking;
pub mod client;
pub mod core;
pub mod transport;

// Re-export commonly used types at the crate root
pub use crate::client::ArachnidShield;
pub use crate::core::{
    DeserializeError, MatchType, MediaClassification, NearMatchDetail, ScannedMedia,
    ScannedPdqHashes, ShieldConfig, ShieldError, ShieldResult, UnknownToken,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use arachnid_shield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::ArachnidShield;
    pub use crate::core::{
        DeserializeError, MatchType, MediaClassification, ScannedMedia, ScannedPdqHashes,
        ShieldConfig, ShieldError, ShieldResult,
    };
    pub use crate::transport::{HttpTransport, MockTransport, Transport};
}
