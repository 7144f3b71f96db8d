//! Core types for the Arachnid Shield client.
//!
//! This module provides the building blocks the client facades are made of:
//!
//! - [`types`] - `MatchType` and `MediaClassification` vocabularies
//! - [`media`] - `ScannedMedia`, the single-media scan result
//! - [`pdq`] - `ScannedPdqHashes`, the batch PDQ scan result
//! - [`error`] - Structured error types
//! - [`config`] - Client configuration
//! - [`mime`] - MIME detection for local media

pub mod config;
pub mod error;
pub mod media;
pub mod mime;
pub mod pdq;
pub mod types;

mod payload;

pub use config::ShieldConfig;
pub use error::{DeserializeError, ShieldError, ShieldResult};
pub use media::{NearMatchDetail, ScannedMedia};
pub use pdq::ScannedPdqHashes;
pub use types::{MatchType, MediaClassification, UnknownToken};
