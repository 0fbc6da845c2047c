//! Auth Middleware
//!
//! Bearer-token guard for protected routes. Stateless per request: the
//! token is verified against the injected signing secret and the
//! current time, the numeric principal id is placed in request
//! extensions, and nothing else is retained. No store access.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::id::UserId;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// The authenticated principal, exposed to downstream handlers
#[derive(Clone, Copy, Debug)]
pub struct CurrentUser {
    pub user_id: UserId,
}

/// Verify the Authorization header and extract the principal id
///
/// Failure shapes are kept distinct:
/// - absent or non-bearer header, bad signature, expiry: client errors
/// - unconfigured secret, non-numeric subject: deployment defects
pub fn authenticate(config: &AuthConfig, headers: &HeaderMap) -> AuthResult<UserId> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingBearer)?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingBearer)?;

    let secret = config
        .token_secret()
        .ok_or(AuthError::TokenSecretMissing)?;

    let subject = platform::token::verify(secret, token)?;

    Ok(UserId::from_i64(subject))
}

/// Middleware that requires a valid bearer token
pub async fn require_bearer_auth(
    State(config): State<Arc<AuthConfig>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    match authenticate(&config, req.headers()) {
        Ok(user_id) => {
            req.extensions_mut().insert(CurrentUser { user_id });
            Ok(next.run(req).await)
        }
        Err(e) => Err(e.into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Duration;

    fn config() -> AuthConfig {
        AuthConfig::with_secret(b"guard-test-secret".to_vec())
    }

    fn bearer_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_valid_token_yields_principal() {
        let config = config();
        let token =
            platform::token::issue(config.token_secret().unwrap(), 7, Duration::hours(1)).unwrap();

        let user_id = authenticate(&config, &bearer_headers(&token)).unwrap();
        assert_eq!(user_id.as_i64(), 7);
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let result = authenticate(&config(), &HeaderMap::new());
        assert!(matches!(result, Err(AuthError::MissingBearer)));
    }

    #[test]
    fn test_non_bearer_header_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic YWxpY2U6aHVudGVyMg=="),
        );
        let result = authenticate(&config(), &headers);
        assert!(matches!(result, Err(AuthError::MissingBearer)));
    }

    #[test]
    fn test_wrong_secret_is_unauthorized_not_server_error() {
        let token = platform::token::issue(b"some-other-secret", 7, Duration::hours(1)).unwrap();

        let result = authenticate(&config(), &bearer_headers(&token));
        assert!(matches!(result, Err(AuthError::TokenRejected)));
        assert_eq!(result.unwrap_err().kind().status_code(), 401);
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let config = config();
        let token = platform::token::issue(
            config.token_secret().unwrap(),
            7,
            Duration::minutes(-5),
        )
        .unwrap();

        let result = authenticate(&config, &bearer_headers(&token));
        assert!(matches!(result, Err(AuthError::TokenRejected)));
    }

    #[test]
    fn test_unconfigured_secret_is_server_error() {
        // Distinguishable from a client sending a bad token
        let config = AuthConfig::default();
        let result = authenticate(&config, &bearer_headers("anything"));
        assert!(matches!(result, Err(AuthError::TokenSecretMissing)));
        assert_eq!(result.unwrap_err().kind().status_code(), 500);
    }

    #[test]
    fn test_non_numeric_subject_is_server_error() {
        use jsonwebtoken::{EncodingKey, Header, encode};

        let config = config();
        let exp = (chrono::Utc::now() + Duration::hours(1)).timestamp();
        let token = encode(
            &Header::default(),
            &serde_json::json!({ "sub": "alice", "exp": exp }),
            &EncodingKey::from_secret(config.token_secret().unwrap()),
        )
        .unwrap();

        let result = authenticate(&config, &bearer_headers(&token));
        assert!(matches!(result, Err(AuthError::TokenPayloadMalformed)));
        assert_eq!(result.unwrap_err().kind().status_code(), 500);
    }
}
