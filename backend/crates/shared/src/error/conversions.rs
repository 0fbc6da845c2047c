//! Error conversions - classification of raw storage failures
//!
//! Maps raw `sqlx` failures to [`AppError`] values carrying a stable
//! status code. The mapping is pure: no I/O, no logging. Errors that are
//! already an [`AppError`] never re-enter this path, so a recognized
//! domain status always passes through unchanged.

use super::app_error::AppError;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// PostgreSQL SQLSTATE 分類表
///
/// ベンダーコードを安定ステータスへ対応付けます。
/// 分類できないコードは 500 とし、診断のため元のメッセージを
/// 失わずに「分類不能」を明示した文言へ連結します。
#[cfg(feature = "sqlx")]
fn classify_sqlstate(code: &str, message: &str) -> AppError {
    match code {
        // Class 23 — Integrity Constraint Violation
        // 一意・外部キー・NOT NULL・CHECK 違反は呼び出し側の入力起因
        "23000" | "23001" | "23502" | "23503" | "23505" | "23514" => {
            AppError::bad_request(message.to_string())
        }
        // Serialization failure, query cancel, server shutdown
        "40001" | "57014" | "57P01" | "57P02" | "57P03" => {
            AppError::service_unavailable("Database temporarily unavailable")
        }
        // Class 42 — Access Rule Violation
        "42501" => AppError::forbidden("Insufficient database privilege"),
        // Class 22 — Data Exception (truncation, overflow, bad datetime)
        "22001" | "22003" | "22007" | "22008" => AppError::bad_request(message.to_string()),
        // Undefined table/column, syntax error
        "42P01" | "42703" | "42601" => AppError::bad_request(message.to_string()),
        _ => AppError::internal(format!(
            "No classification for database error ({}): {}",
            code, message
        )),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Database connection pool exhausted").with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database connection error").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                let app_err = match db_err.code() {
                    Some(code) => classify_sqlstate(code.as_ref(), db_err.message()),
                    None => AppError::internal(format!(
                        "Could not determine status for database error: {}",
                        db_err.message()
                    )),
                };
                app_err.with_source(err)
            }
            _ => AppError::internal(format!(
                "Could not determine status for storage error: {}",
                err
            ))
            .with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        // 分類不能な 500 を含むサーバーエラーは応答前に必ず記録する
        if self.is_server_error() {
            tracing::error!(
                status = self.status_code(),
                message = %self.message(),
                source = ?std::error::Error::source(&self),
                "Server error"
            );
        }

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({
            "status": self.status_code(),
            "title": self.kind().as_str(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "sqlx"))]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;
    use std::borrow::Cow;
    use std::fmt;

    #[derive(Debug)]
    struct FakeDbError {
        code: Option<&'static str>,
        message: &'static str,
    }

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl std::error::Error for FakeDbError {}

    impl sqlx::error::DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            self.message
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            self.code.map(Cow::Borrowed)
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::Other
        }
    }

    fn db_error(code: Option<&'static str>, message: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError { code, message }))
    }

    #[test]
    fn test_constraint_violations_are_client_errors() {
        for code in ["23505", "23503", "23502", "23514"] {
            let err: AppError = db_error(Some(code), "duplicate key value").into();
            assert_eq!(err.kind(), ErrorKind::BadRequest, "code {}", code);
            assert_eq!(err.message(), "duplicate key value");
        }
    }

    #[test]
    fn test_transient_conditions_are_unavailable() {
        for code in ["40001", "57014", "57P01", "57P03"] {
            let err: AppError = db_error(Some(code), "shutting down").into();
            assert_eq!(err.kind(), ErrorKind::ServiceUnavailable, "code {}", code);
        }
    }

    #[test]
    fn test_insufficient_privilege_is_forbidden() {
        let err: AppError = db_error(Some("42501"), "permission denied").into();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_data_exceptions_are_client_errors() {
        for code in ["22001", "22003", "22007", "22008"] {
            let err: AppError = db_error(Some(code), "value too long").into();
            assert_eq!(err.kind(), ErrorKind::BadRequest, "code {}", code);
        }
    }

    #[test]
    fn test_schema_errors_are_client_errors() {
        for code in ["42P01", "42703", "42601"] {
            let err: AppError = db_error(Some(code), "relation does not exist").into();
            assert_eq!(err.kind(), ErrorKind::BadRequest, "code {}", code);
        }
    }

    #[test]
    fn test_unknown_code_preserves_message() {
        let err: AppError = db_error(Some("XX000"), "index corrupted").into();
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
        assert!(err.message().contains("No classification"));
        assert!(err.message().contains("XX000"));
        assert!(err.message().contains("index corrupted"));
    }

    #[test]
    fn test_missing_code_preserves_message() {
        let err: AppError = db_error(None, "driver exploded").into();
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
        assert!(err.message().contains("Could not determine status"));
        assert!(err.message().contains("driver exploded"));
    }

    #[test]
    fn test_row_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_pool_timeout_is_unavailable() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_source_is_retained() {
        let err: AppError = db_error(Some("23505"), "duplicate key value").into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
