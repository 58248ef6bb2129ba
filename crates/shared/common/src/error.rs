//! Unified error handling for the portal client.
//!
//! Provides a single error type covering:
//! - form and payload validation failures
//! - HTTP failures reported by the backend
//! - transport and decoding failures

use domain::DomainError;
use reqwest::StatusCode;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Unknown form control: {0}")]
    UnknownControl(String),

    // Rate limiting
    #[error("Too many requests")]
    TooManyRequests,

    // Backend errors
    #[error("Service unavailable")]
    ServiceUnavailable(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    // Transport
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get error code for logs and callers
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::UnknownControl(_) => "UNKNOWN_CONTROL",
            AppError::TooManyRequests => "TOO_MANY_REQUESTS",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::Api { .. } => "API_ERROR",
            AppError::Http(_) => "HTTP_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides transport details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for validation errors
            AppError::Validation(msg) => msg.clone(),

            // Hide details for transport/internal errors
            AppError::Http(e) => {
                tracing::error!("HTTP error: {:?}", e);
                "Could not reach the server".to_string()
            }
            AppError::Json(e) => {
                tracing::error!("JSON error: {:?}", e);
                "Unexpected response from the server".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::ServiceUnavailable(detail) => {
                tracing::error!("Service unavailable: {}", detail);
                "Service is unavailable, try again later".to_string()
            }
            AppError::Api { status, message } => {
                tracing::error!("API error {}: {}", status, message);
                "The request was rejected by the server".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }

    /// Map a non-success HTTP status and body to an error.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => AppError::Unauthorized,
            StatusCode::FORBIDDEN => AppError::Forbidden,
            StatusCode::TOO_MANY_REQUESTS => AppError::TooManyRequests,
            s if s.is_server_error() => AppError::ServiceUnavailable(format!("{}: {}", s, body)),
            s => AppError::Api {
                status: s.as_u16(),
                message: body,
            },
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::UnknownControl(path) | DomainError::NotAControl(path) => {
                AppError::UnknownControl(path)
            }
            DomainError::InvalidForm => AppError::Validation(DomainError::InvalidForm.to_string()),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            AppError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            AppError::Unauthorized
        ));
        assert!(matches!(
            AppError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            AppError::TooManyRequests
        ));
        assert!(matches!(
            AppError::from_status(StatusCode::BAD_GATEWAY, "down".to_string()),
            AppError::ServiceUnavailable(_)
        ));
        match AppError::from_status(StatusCode::BAD_REQUEST, "bad".to_string()) {
            AppError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_domain_conversion() {
        let err: AppError = DomainError::validation("Passwords are not equal").into();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.user_message(), "Passwords are not equal");

        let err: AppError = DomainError::NotAControl("passwords".to_string()).into();
        assert!(matches!(err, AppError::UnknownControl(ref p) if p == "passwords"));

        let err: AppError = DomainError::InvalidForm.into();
        assert_eq!(err.user_message(), "Form is invalid");
    }

    #[test]
    fn test_user_message_hides_internal_details() {
        let err = AppError::internal("token store poisoned");
        assert_eq!(err.user_message(), "An internal error occurred");
    }
}
