//! Signed Access Tokens
//!
//! Stateless bearer tokens (JWT, HS256) carrying a numeric subject.
//! The signing secret is always passed in by the caller; this module
//! never reads configuration on its own.
//!
//! Verification failures are split into two shapes on purpose:
//! - [`AccessTokenError::Rejected`] - anything a client could have caused
//!   (missing/garbled token, wrong signature, expired)
//! - [`AccessTokenError::MalformedSubject`] - a correctly signed token
//!   whose payload carries no usable numeric subject, which points at a
//!   token-issuing defect rather than a hostile caller

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access token errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessTokenError {
    /// Token missing, malformed, expired, or signature mismatch
    #[error("Access token is invalid or expired")]
    Rejected,

    /// Correctly signed token without a numeric subject claim
    #[error("Access token payload has no numeric subject")]
    MalformedSubject,

    /// Signing failed
    #[error("Access token signing failed: {0}")]
    SigningFailed(String),
}

#[derive(Debug, Serialize)]
struct Claims {
    sub: i64,
    iat: i64,
    exp: i64,
}

/// Decoded leniently so that a signature-valid token with an unexpected
/// payload shape can be told apart from a forged or expired one.
#[derive(Debug, Deserialize)]
struct RawClaims {
    #[serde(default)]
    sub: Option<serde_json::Value>,
}

/// Issue a signed token for the given subject
pub fn issue(secret: &[u8], subject: i64, ttl: Duration) -> Result<String, AccessTokenError> {
    let now = Utc::now();
    let claims = Claims {
        sub: subject,
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AccessTokenError::SigningFailed(e.to_string()))
}

/// Verify a token and extract its numeric subject
///
/// Signature and expiry are checked against `secret` and the current
/// time. The subject claim is extracted afterwards so its absence maps
/// to [`AccessTokenError::MalformedSubject`], not to a rejection.
pub fn verify(secret: &[u8], token: &str) -> Result<i64, AccessTokenError> {
    let data = decode::<RawClaims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|_| AccessTokenError::Rejected)?;

    data.claims
        .sub
        .as_ref()
        .and_then(|v| v.as_i64())
        .ok_or(AccessTokenError::MalformedSubject)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-signing-secret";

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let token = issue(SECRET, 42, Duration::hours(1)).unwrap();
        assert_eq!(verify(SECRET, &token).unwrap(), 42);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue(SECRET, 42, Duration::hours(1)).unwrap();
        assert_eq!(
            verify(b"another-secret", &token),
            Err(AccessTokenError::Rejected)
        );
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Well past the decoder's clock leeway
        let token = issue(SECRET, 42, Duration::minutes(-5)).unwrap();
        assert_eq!(verify(SECRET, &token), Err(AccessTokenError::Rejected));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(
            verify(SECRET, "not.a.token"),
            Err(AccessTokenError::Rejected)
        );
        assert_eq!(verify(SECRET, ""), Err(AccessTokenError::Rejected));
    }

    fn issue_raw(claims: &serde_json::Value) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    #[test]
    fn test_non_numeric_subject_is_malformed() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = issue_raw(&serde_json::json!({ "sub": "alice", "exp": exp }));
        assert_eq!(
            verify(SECRET, &token),
            Err(AccessTokenError::MalformedSubject)
        );
    }

    #[test]
    fn test_missing_subject_is_malformed() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = issue_raw(&serde_json::json!({ "exp": exp }));
        assert_eq!(
            verify(SECRET, &token),
            Err(AccessTokenError::MalformedSubject)
        );
    }

    #[test]
    fn test_malformed_subject_beats_wrong_secret() {
        // A bad payload signed with the wrong key must still read as a
        // rejection, not as an issuing defect
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = encode(
            &Header::default(),
            &serde_json::json!({ "sub": "alice", "exp": exp }),
            &EncodingKey::from_secret(b"another-secret"),
        )
        .unwrap();
        assert_eq!(verify(SECRET, &token), Err(AccessTokenError::Rejected));
    }
}
