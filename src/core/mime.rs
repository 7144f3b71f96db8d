//! MIME type detection for local media.

/// Content type sent when the media type cannot be detected.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Detects the MIME type of media from its leading bytes.
pub fn detect(content: &[u8]) -> Option<&'static str> {
    infer::get(content).map(|kind| kind.mime_type())
}

/// Detects the MIME type, falling back to `application/octet-stream`.
pub fn detect_or_default(content: &[u8]) -> &'static str {
    detect(content).unwrap_or(FALLBACK_MIME_TYPE)
}
