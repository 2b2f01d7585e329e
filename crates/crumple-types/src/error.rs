//! Error types for the Crumple engine.
//!
//! All crates return `CrumpleResult<T>` from fallible operations.
//! Configuration errors surface at construction time — a deformer or
//! cage driver is never built in an invalid configuration.

use thiserror::Error;

/// Unified error type for the Crumple engine.
#[derive(Debug, Error)]
pub enum CrumpleError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A required reference is missing (empty region list, unknown bone, etc.).
    #[error("Missing reference: {0}")]
    MissingReference(String),

    /// Region assignment or contact resolution failure.
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, CrumpleError>`.
pub type CrumpleResult<T> = Result<T, CrumpleError>;
