//! Error types for asset decoding and PNG encoding.
//!
//! Composition itself is total: missing optional assets degrade to
//! placeholders, and disk-tier failures are logged and swallowed. Errors
//! only surface when a caller hands us bytes that do not decode, or when
//! encoding a finished bitmap fails.

use thiserror::Error;

/// Errors surfaced by the public payload and encoding helpers.
#[derive(Debug, Error)]
pub enum ShareError {
    /// Supplied image bytes could not be decoded.
    #[error("image decode failed: {0}")]
    Decode(#[source] image::ImageError),

    /// A finished bitmap could not be encoded as PNG.
    #[error("png encode failed: {0}")]
    Encode(#[source] image::ImageError),
}
