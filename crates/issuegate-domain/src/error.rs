//! Domain error types for workflow and access decisions.

use thiserror::Error;

/// Domain-specific errors for decision operations.
///
/// Denials are never errors: every decision function returns `Ok(false)`
/// for "not permitted". Errors are reserved for failures of the
/// persistence collaborator and malformed engine inputs.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The persistence collaborator failed to answer a lookup.
    #[error("storage error: {message}")]
    Storage { message: String },

    /// A referenced entity was missing where the engine requires it.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u64 },

    /// A raw field value could not be coerced into the field's type.
    #[error("invalid value for field '{field}': {message}")]
    InvalidFieldValue { field: String, message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
