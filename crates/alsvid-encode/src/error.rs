//! Error types for image encoding.

use thiserror::Error;

use alsvid_ir::IrError;
use alsvid_sim::SimError;

/// Errors that can occur while encoding or reconstructing images.
///
/// Input validation runs before any gate is appended: a returned error means
/// no partial circuit was produced.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The image array has an unsupported number of dimensions.
    #[error("unsupported image rank: {ndim} dimensions (expected 2 or 3)")]
    InvalidShape { ndim: usize },

    /// The input violates a scheme-specific constraint.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A 3-D image has a channel count the scheme cannot express.
    #[error("ambiguous channel count: {channels} (expected 1 or 3)")]
    AmbiguousChannelCount { channels: usize },

    /// Circuit construction failed.
    #[error("circuit construction failed: {0}")]
    Ir(#[from] IrError),

    /// Simulation failed during recovery.
    #[error("simulation failed: {0}")]
    Sim(#[from] SimError),
}

/// Result type alias for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;
