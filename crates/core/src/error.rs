//! Shared error model for the label pipeline.

use thiserror::Error;

/// Result type used across the encoding and layout layers.
pub type LabelResult<T> = Result<T, LabelError>;

/// Label-pipeline error.
///
/// Keep this focused on deterministic failures (payload validation, checksum
/// contradictions, unusable geometry). Filesystem and image-encoder concerns
/// belong to the render layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// The payload cannot be encoded by the chosen symbology.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A supplied check digit/character contradicts the computed one.
    #[error("checksum mismatch: expected '{expected}', got '{actual}'")]
    ChecksumMismatch { expected: char, actual: char },

    /// Render geometry is unusable (non-positive sizes and the like).
    #[error("invalid render options: {0}")]
    InvalidOptions(String),
}

impl LabelError {
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    pub fn checksum_mismatch(expected: char, actual: char) -> Self {
        Self::ChecksumMismatch { expected, actual }
    }

    pub fn invalid_options(msg: impl Into<String>) -> Self {
        Self::InvalidOptions(msg.into())
    }
}
