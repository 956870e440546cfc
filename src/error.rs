//! Error types shared by the sketching core.

use thiserror::Error;

/// Errors surfaced by sketch construction, k-mer encoding and distance
/// computation. Every variant is a programming or configuration error:
/// inputs are in-memory and deterministic, so nothing here is retryable.
#[derive(Error, Debug)]
pub enum SketchError {
    /// A sequence or sketch handed to the core does not satisfy a
    /// precondition (symbol out of range, mismatched sketch widths, empty
    /// sequence set).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A parameter object could not be built from the supplied
    /// configuration (non-positive dimensions, k-mer alphabet overflow).
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SketchError>;
