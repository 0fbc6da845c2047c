//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system. Database failures
//! are kept raw here and classified only at the HTTP boundary, so the
//! vendor-code mapping happens in exactly one place.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::token::AccessTokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// User name already exists
    #[error("User name already exists")]
    UserNameTaken,

    /// Invalid credentials (unknown user or wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authorization header absent or not bearer-shaped
    #[error("Missing or malformed Authorization header")]
    MissingBearer,

    /// Bearer token rejected (signature, expiry, or shape)
    #[error("Access token is invalid or expired")]
    TokenRejected,

    /// No signing secret configured - a deployment defect
    #[error("Access token signing secret is not configured")]
    TokenSecretMissing,

    /// Correctly signed token with an unusable payload - an issuing defect
    #[error("Access token payload is malformed")]
    TokenPayloadMalformed,

    /// One generic failure for every bad-reset-token cause
    #[error("Invalid or expired reset token")]
    ResetTokenInvalid,

    /// Account has no local password hash
    #[error("Account has no password set")]
    PasswordNotSet,

    /// User name validation error
    #[error("User name validation failed: {0}")]
    UserNameValidation(String),

    /// Password validation error
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Mail delivery failed
    #[error("Mail delivery failed: {0}")]
    MailDelivery(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Convert to AppError, classifying raw database failures
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::UserNotFound => AppError::not_found(self.to_string()),
            AuthError::UserNameTaken => AppError::bad_request(self.to_string())
                .with_action("Choose a different user name"),
            AuthError::InvalidCredentials
            | AuthError::MissingBearer
            | AuthError::TokenRejected => AppError::unauthorized(self.to_string()),
            AuthError::ResetTokenInvalid => AppError::bad_request(self.to_string())
                .with_action("Request a new password reset"),
            AuthError::PasswordNotSet => AppError::bad_request(self.to_string()),
            AuthError::UserNameValidation(_) | AuthError::PasswordValidation(_) => {
                AppError::bad_request(self.to_string())
            }
            AuthError::MailDelivery(_) => AppError::service_unavailable(self.to_string()),
            AuthError::TokenSecretMissing | AuthError::TokenPayloadMalformed => {
                AppError::internal(self.to_string())
            }
            AuthError::Database(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::internal(msg),
        }
    }

    /// Get the ErrorKind this error maps to
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UserNameTaken
            | AuthError::ResetTokenInvalid
            | AuthError::PasswordNotSet
            | AuthError::UserNameValidation(_)
            | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::MissingBearer
            | AuthError::TokenRejected => ErrorKind::Unauthorized,
            AuthError::MailDelivery(_) => ErrorKind::ServiceUnavailable,
            AuthError::TokenSecretMissing
            | AuthError::TokenPayloadMalformed
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::TokenSecretMissing => {
                tracing::error!("Access token secret is not configured");
            }
            AuthError::TokenPayloadMalformed => {
                tracing::error!("Verified access token carried a malformed payload");
            }
            AuthError::MailDelivery(msg) => {
                tracing::error!(message = %msg, "Reset mail delivery failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AccessTokenError> for AuthError {
    fn from(err: AccessTokenError) -> Self {
        match err {
            AccessTokenError::Rejected => AuthError::TokenRejected,
            AccessTokenError::MalformedSubject => AuthError::TokenPayloadMalformed,
            AccessTokenError::SigningFailed(msg) => AuthError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.kind().status_code(), 401);
        assert_eq!(AuthError::MissingBearer.kind().status_code(), 401);
        assert_eq!(AuthError::TokenRejected.kind().status_code(), 401);
        assert_eq!(AuthError::ResetTokenInvalid.kind().status_code(), 400);
        assert_eq!(AuthError::PasswordNotSet.kind().status_code(), 400);
        assert_eq!(AuthError::UserNameTaken.kind().status_code(), 400);
        assert_eq!(AuthError::UserNotFound.kind().status_code(), 404);
    }

    #[test]
    fn test_config_defects_are_server_errors() {
        // A bad token and a missing secret must stay distinguishable
        assert_eq!(AuthError::TokenSecretMissing.kind().status_code(), 500);
        assert_eq!(AuthError::TokenPayloadMalformed.kind().status_code(), 500);
        assert_ne!(
            AuthError::TokenSecretMissing.kind(),
            AuthError::TokenRejected.kind()
        );
    }

    #[test]
    fn test_token_error_mapping() {
        let err: AuthError = AccessTokenError::Rejected.into();
        assert!(matches!(err, AuthError::TokenRejected));

        let err: AuthError = AccessTokenError::MalformedSubject.into();
        assert!(matches!(err, AuthError::TokenPayloadMalformed));
    }

    #[test]
    fn test_database_errors_are_classified() {
        let err = AuthError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.into_app_error().status_code(), 404);

        let err = AuthError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.into_app_error().status_code(), 503);
    }
}
