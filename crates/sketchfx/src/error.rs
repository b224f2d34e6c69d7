//! Unified error type for the sketchfx public API.

use thiserror::Error;

use crate::color::ParseColorError;

/// Errors reported by the transform pipelines.
#[derive(Debug, Error)]
pub enum StyleError {
    /// Pixel block size must be at least 1.
    #[error("pixel block size must be at least 1")]
    InvalidBlockSize,

    /// A color string could not be parsed.
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
}
