//! Blog Error Types
//!
//! Blog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Ownership failures never reveal
//! who the actual owner is; a missing referent is its own condition.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    /// Post not found
    #[error("Post not found")]
    PostNotFound,

    /// Comment not found
    #[error("Comment not found")]
    CommentNotFound,

    /// Authenticated, but not an authority over this resource
    #[error("You do not have permission to modify this resource")]
    NotOwner,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Convert to AppError, classifying raw database failures
    pub fn into_app_error(self) -> AppError {
        match self {
            BlogError::PostNotFound | BlogError::CommentNotFound => {
                AppError::not_found(self.to_string())
            }
            BlogError::NotOwner => AppError::forbidden(self.to_string()),
            BlogError::Database(e) => AppError::from(e),
            BlogError::Internal(msg) => AppError::internal(msg),
        }
    }

    /// Get the ErrorKind this error maps to
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::PostNotFound | BlogError::CommentNotFound => ErrorKind::NotFound,
            BlogError::NotOwner => ErrorKind::Forbidden,
            BlogError::Database(_) | BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            BlogError::NotOwner => {
                tracing::warn!("Ownership check denied a mutation");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BlogError::PostNotFound.kind().status_code(), 404);
        assert_eq!(BlogError::CommentNotFound.kind().status_code(), 404);
        assert_eq!(BlogError::NotOwner.kind().status_code(), 403);
        assert_eq!(BlogError::Internal("x".into()).kind().status_code(), 500);
    }

    #[test]
    fn test_database_errors_are_classified() {
        let err = BlogError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.into_app_error().status_code(), 404);

        let err = BlogError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.into_app_error().status_code(), 503);
    }

    #[test]
    fn test_forbidden_message_reveals_no_owner() {
        let msg = BlogError::NotOwner.to_string();
        assert!(!msg.contains("owner"), "message must not name the owner");
    }
}
