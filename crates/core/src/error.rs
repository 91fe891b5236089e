//! Domain-level error type.

/// Errors produced by domain logic, independent of any transport.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input failed validation (empty token, malformed id, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
