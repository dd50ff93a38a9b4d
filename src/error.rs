//! Error types shared across the crate.

use thiserror::Error;

/// Error type for validation and requirements resolution
#[derive(Error, Debug)]
pub enum Error {
    /// A cluster or host configuration failed a compatibility rule
    #[error("{0}")]
    Validation(String),

    /// Caller passed a value outside the known vocabulary
    #[error("{0}")]
    InvalidInput(String),

    /// The operator requirements collaborator failed
    #[error("{0}")]
    OperatorRequirements(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, Error>;
