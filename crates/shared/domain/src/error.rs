//! Domain-level errors.
//!
//! These errors represent misuse of the form model or rule violations
//! detected outside of the reactive validators. They are independent of
//! the HTTP layer.

use thiserror::Error;

/// Domain-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed for a field or payload
    #[error("Validation error: {0}")]
    Validation(String),

    /// No control exists at the given path
    #[error("Unknown form control: {0}")]
    UnknownControl(String),

    /// The path resolves to a group where a single control was expected
    #[error("Not a form control: {0}")]
    NotAControl(String),

    /// A snapshot was requested from a form that is not valid
    #[error("Form is invalid")]
    InvalidForm,
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create an unknown control error
    pub fn unknown_control(path: impl Into<String>) -> Self {
        DomainError::UnknownControl(path.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
