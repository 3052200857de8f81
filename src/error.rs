//! Error types for the cloth simulation.
//!
//! Construction is the only fallible step; ticking never fails.

use thiserror::Error;

/// Unified error type for building a cloth simulation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClothError {
    /// A configuration value is out of range or unrecognized.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Convenience alias for `Result<T, ClothError>`.
pub type ClothResult<T> = Result<T, ClothError>;

/// Shorthand used by the validation code.
pub(crate) fn invalid(msg: impl Into<String>) -> ClothError {
    ClothError::InvalidConfiguration(msg.into())
}
