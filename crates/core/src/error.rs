//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Shopper input mistakes (out-of-range quantities, bad contact fields) are not
/// errors at this level; they are ordinary outcomes reported back to the form.
/// `DomainError` covers the cases that indicate a defect in wiring or
/// configuration (unknown variant, unknown shipping method, broken catalog).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed configuration).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced variant, control or method does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A conflicting operation is already in progress.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = DomainError::not_found("variant `green`");
        assert_eq!(err.to_string(), "not found: variant `green`");

        let err = DomainError::validation("max_quantity must be at least 1");
        assert_eq!(
            err.to_string(),
            "validation failed: max_quantity must be at least 1"
        );
    }
}
