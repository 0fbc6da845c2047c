//! Repository Traits
//!
//! Interfaces for data persistence and out-of-band delivery.
//! Implementations are in the infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::{credentials::Credentials, user::User};
use crate::domain::value_object::{
    reset_token::ResetTokenDigest, user_name::UserName, user_password::UserPassword,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user; the store assigns the id
    async fn create(
        &self,
        user_name: &UserName,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Find user by user name (canonical form)
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Check if user name exists
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Update profile fields; returns affected rows
    async fn update_profile(
        &self,
        user_id: UserId,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> AuthResult<u64>;

    /// Delete a user (owned posts cascade, comment authorship lapses);
    /// returns affected rows
    async fn delete(&self, user_id: UserId) -> AuthResult<u64>;
}

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Create credentials for a new user
    async fn create(&self, user_id: UserId, password_hash: &UserPassword) -> AuthResult<()>;

    /// Find credentials by user ID
    async fn find_by_user_id(&self, user_id: UserId) -> AuthResult<Option<Credentials>>;

    /// Replace the password hash; returns affected rows
    async fn update_password(
        &self,
        user_id: UserId,
        password_hash: &UserPassword,
    ) -> AuthResult<u64>;

    /// Store a reset token digest and expiry, clearing any prior
    /// verification, as one statement; returns affected rows
    async fn store_reset_token(
        &self,
        user_id: UserId,
        digest: &ResetTokenDigest,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<u64>;

    /// Mark a still-live reset token as verified; returns affected rows
    /// (zero when the token is gone or expired)
    async fn mark_reset_verified(&self, user_id: UserId, now: DateTime<Utc>) -> AuthResult<u64>;

    /// Replace the password and clear digest, expiry, and verified flag
    /// as one statement, guarded on a still-live token; returns affected
    /// rows (zero when the token was already consumed or expired)
    async fn consume_reset(
        &self,
        user_id: UserId,
        new_password_hash: &UserPassword,
        now: DateTime<Utc>,
    ) -> AuthResult<u64>;

    /// All credentials holding a live (unexpired) reset token
    async fn find_pending_resets(&self, now: DateTime<Utc>) -> AuthResult<Vec<Credentials>>;
}

/// Out-of-band delivery of raw reset tokens
#[trait_variant::make(ResetMailer: Send)]
pub trait LocalResetMailer {
    /// Deliver a raw reset token to the recipient address
    async fn send_password_reset(&self, recipient: &str, raw_token: &str) -> AuthResult<()>;
}
