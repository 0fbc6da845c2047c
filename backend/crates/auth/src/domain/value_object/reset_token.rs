//! Reset Token Value Object
//!
//! Single-use, time-limited secret authorizing a password change
//! without an active session. The raw token travels to the user
//! out-of-band exactly once; only its one-way digest is ever stored.
//! Because the digest is not invertible, a submitted token can only be
//! matched by trial comparison against stored digests.

use std::fmt;

use platform::crypto;
use platform::password::{HashedSecret, SecretHashError};

/// Entropy of a generated token
pub const RESET_TOKEN_BYTES: usize = 32;

// ============================================================================
// Raw token (delivered out-of-band, never stored)
// ============================================================================

/// The raw reset token text
pub struct RawResetToken(String);

impl RawResetToken {
    /// Generate a fresh token from cryptographically secure randomness
    pub fn generate() -> Self {
        Self(crypto::to_base64_url(&crypto::random_bytes(
            RESET_TOKEN_BYTES,
        )))
    }

    /// Wrap a token submitted by a caller for comparison
    pub fn from_submission(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The token text, for out-of-band delivery
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compute the one-way digest to store in place of the token
    pub fn digest(&self) -> Result<ResetTokenDigest, SecretHashError> {
        Ok(ResetTokenDigest(platform::password::hash_secret(
            self.0.as_bytes(),
            None,
        )?))
    }
}

impl fmt::Debug for RawResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawResetToken").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Stored digest
// ============================================================================

/// One-way digest of a reset token (PHC string, safe to persist)
#[derive(Clone, PartialEq, Eq)]
pub struct ResetTokenDigest(HashedSecret);

impl ResetTokenDigest {
    /// Restore from a stored PHC string
    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, SecretHashError> {
        Ok(Self(HashedSecret::from_phc_string(phc_string)?))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Trial-compare a submitted token against this digest
    pub fn matches(&self, submitted: &RawResetToken) -> bool {
        self.0.matches(submitted.as_str().as_bytes(), None)
    }
}

impl fmt::Debug for ResetTokenDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetTokenDigest")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_unique() {
        let a = RawResetToken::generate();
        let b = RawResetToken::generate();
        assert_ne!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = RawResetToken::generate();
        assert!(
            token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_digest_matches_only_its_token() {
        let token = RawResetToken::generate();
        let digest = token.digest().unwrap();

        let resubmitted = RawResetToken::from_submission(token.as_str());
        assert!(digest.matches(&resubmitted));

        let other = RawResetToken::generate();
        assert!(!digest.matches(&other));
    }

    #[test]
    fn test_digest_roundtrip_through_storage() {
        let token = RawResetToken::generate();
        let digest = token.digest().unwrap();

        let stored = digest.as_phc_string().to_string();
        let restored = ResetTokenDigest::from_phc_string(stored).unwrap();

        assert!(restored.matches(&RawResetToken::from_submission(token.as_str())));
    }

    #[test]
    fn test_debug_redaction() {
        let token = RawResetToken::generate();
        let debug = format!("{:?}", token);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(token.as_str()));
    }
}
