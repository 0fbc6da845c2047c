//! Credentials Entity
//!
//! Authentication credentials for a user.
//! Separated from User entity to isolate sensitive data.
//!
//! The pending reset is a single optional value holding digest and
//! expiry together, so a digest without an expiry (or the reverse) is
//! unrepresentable. Liveness is always computed against the supplied
//! clock; the stored `reset_verified` flag alone proves nothing.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{reset_token::ResetTokenDigest, user_password::UserPassword};

/// A stored reset token: one-way digest plus its expiry
#[derive(Debug, Clone)]
pub struct PendingReset {
    /// Argon2id digest of the raw token (the raw token is never stored)
    pub token_digest: ResetTokenDigest,
    /// Instant after which the token is dead
    pub expires_at: DateTime<Utc>,
}

impl PendingReset {
    /// Whether the token is still usable at `now`
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Credentials entity
///
/// Contains sensitive authentication data:
/// - Password hash (absent for accounts without a local password)
/// - Pending password-reset token state
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Reference to User
    pub user_id: UserId,
    /// Hashed password
    pub password_hash: Option<UserPassword>,
    /// Pending reset token, if one has been issued
    pub pending_reset: Option<PendingReset>,
    /// Whether the pending token passed the optional verify step
    pub reset_verified: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Credentials {
    /// Create new credentials with a local password
    pub fn new(user_id: UserId, password_hash: UserPassword) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            password_hash: Some(password_hash),
            pending_reset: None,
            reset_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Issue a reset token: digest and expiry are set together and any
    /// prior verification is discarded
    pub fn issue_reset(&mut self, token_digest: ResetTokenDigest, expires_at: DateTime<Utc>) {
        self.pending_reset = Some(PendingReset {
            token_digest,
            expires_at,
        });
        self.reset_verified = false;
        self.updated_at = Utc::now();
    }

    /// The pending reset, if it is still live at `now`
    pub fn live_reset(&self, now: DateTime<Utc>) -> Option<&PendingReset> {
        self.pending_reset.as_ref().filter(|r| r.is_live(now))
    }

    /// Mark the pending reset as verified; returns false when there is
    /// no live token to verify
    pub fn mark_reset_verified(&mut self, now: DateTime<Utc>) -> bool {
        if self.live_reset(now).is_none() {
            return false;
        }
        self.reset_verified = true;
        self.updated_at = now;
        true
    }

    /// Consume the reset: replace the password and clear digest, expiry,
    /// and verified flag together
    pub fn consume_reset(&mut self, new_password: UserPassword) {
        self.password_hash = Some(new_password);
        self.pending_reset = None;
        self.reset_verified = false;
        self.updated_at = Utc::now();
    }

    /// Replace the password (authenticated change, no reset involved)
    pub fn update_password(&mut self, new_password: UserPassword) {
        self.password_hash = Some(new_password);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::reset_token::RawResetToken;
    use chrono::Duration;
    use kernel::id::Id;

    fn password() -> UserPassword {
        let raw = crate::domain::value_object::user_password::RawPassword::new(
            "CorrectHorse9!".to_string(),
        )
        .unwrap();
        UserPassword::from_raw(&raw, None).unwrap()
    }

    fn digest() -> ResetTokenDigest {
        RawResetToken::generate().digest().unwrap()
    }

    fn credentials() -> Credentials {
        Credentials::new(Id::from_i64(1), password())
    }

    #[test]
    fn test_issue_sets_pair_and_clears_verified() {
        let mut cred = credentials();
        cred.reset_verified = true;

        cred.issue_reset(digest(), Utc::now() + Duration::hours(1));

        let reset = cred.pending_reset.as_ref().unwrap();
        assert!(reset.is_live(Utc::now()));
        assert!(!cred.reset_verified);
    }

    #[test]
    fn test_consume_clears_everything_together() {
        let mut cred = credentials();
        cred.issue_reset(digest(), Utc::now() + Duration::hours(1));
        cred.mark_reset_verified(Utc::now());

        cred.consume_reset(password());

        assert!(cred.pending_reset.is_none());
        assert!(!cred.reset_verified);
        assert!(cred.password_hash.is_some());
    }

    #[test]
    fn test_expired_reset_is_not_live() {
        let mut cred = credentials();
        cred.issue_reset(digest(), Utc::now() - Duration::seconds(1));

        assert!(cred.live_reset(Utc::now()).is_none());
    }

    #[test]
    fn test_verified_flag_never_outlives_expiry() {
        let mut cred = credentials();
        cred.issue_reset(digest(), Utc::now() + Duration::hours(1));
        assert!(cred.mark_reset_verified(Utc::now()));

        // The stored flag stays true, but liveness is computed from the
        // clock, so an expired token reads as no pending reset at all
        let later = Utc::now() + Duration::hours(2);
        assert!(cred.live_reset(later).is_none());
    }

    #[test]
    fn test_cannot_verify_without_live_token() {
        let mut cred = credentials();
        assert!(!cred.mark_reset_verified(Utc::now()));

        cred.issue_reset(digest(), Utc::now() - Duration::seconds(1));
        assert!(!cred.mark_reset_verified(Utc::now()));
        assert!(!cred.reset_verified);
    }
}
