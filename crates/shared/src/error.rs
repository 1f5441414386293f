//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every failure a request can hit ends up as one of these before it is
/// rendered for the client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing, invalid or expired bearer token.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Caller's role does not allow the action.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing required field or malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Well-formed input that breaks a business rule (e.g. overpayment).
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Conflict (e.g., profile already registered).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Store error.
    #[error("Database error: {0}")]
    Database(String),

    /// External service error (challenge verifier, form relay).
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::BusinessRule(_) => 422,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::ExternalService(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error is the server's fault rather than the caller's.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Message safe to show to the client.
    ///
    /// Server-side failures are reported generically; details only go to the log.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::Validation(m)
            | Self::BusinessRule(m)
            | Self::Conflict(m) => m.clone(),
            Self::Database(_) | Self::Internal(_) => "An error occurred".to_string(),
            Self::ExternalService(_) => "An external service is unavailable".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Unauthorized(String::new()).status_code(), 401);
        assert_eq!(AppError::Forbidden(String::new()).status_code(), 403);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::BusinessRule(String::new()).status_code(), 422);
        assert_eq!(AppError::Conflict(String::new()).status_code(), 409);
        assert_eq!(AppError::Database(String::new()).status_code(), 500);
        assert_eq!(AppError::ExternalService(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::BusinessRule(String::new()).error_code(),
            "BUSINESS_RULE_VIOLATION"
        );
        assert_eq!(AppError::Forbidden(String::new()).error_code(), "FORBIDDEN");
        assert_eq!(
            AppError::Database(String::new()).error_code(),
            "DATABASE_ERROR"
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AppError::Database("connection refused at 10.0.0.3".into());
        assert!(err.is_server_error());
        assert_eq!(err.public_message(), "An error occurred");
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_client_errors_keep_message() {
        let err = AppError::BusinessRule("Paid amount exceeds amount due".into());
        assert!(!err.is_server_error());
        assert_eq!(err.public_message(), "Paid amount exceeds amount due");
    }
}
