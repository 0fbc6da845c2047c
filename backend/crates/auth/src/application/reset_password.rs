//! Reset Password Use Case
//!
//! Consumes a reset token and replaces the password.
//!
//! Every failure mode - unknown user, no pending reset, expired token,
//! digest mismatch, already consumed - collapses into one generic
//! error, so callers cannot probe which condition they hit.

use chrono::Utc;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{
    reset_token::RawResetToken,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Reset password input
pub struct ResetPasswordInput {
    pub user_name: String,
    pub token: String,
    pub new_password: String,
}

/// Reset password use case
pub struct ResetPasswordUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    user_repo: Arc<U>,
    cred_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> ResetPasswordUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    pub fn new(user_repo: Arc<U>, cred_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            cred_repo,
            config,
        }
    }

    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<()> {
        let user_name =
            UserName::new(input.user_name).map_err(|_| AuthError::ResetTokenInvalid)?;

        let user = self
            .user_repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(AuthError::ResetTokenInvalid)?;

        let credentials = self
            .cred_repo
            .find_by_user_id(user.user_id)
            .await?
            .ok_or(AuthError::ResetTokenInvalid)?;

        let now = Utc::now();
        let reset = credentials
            .live_reset(now)
            .ok_or(AuthError::ResetTokenInvalid)?;

        let submitted = RawResetToken::from_submission(input.token);
        if !reset.token_digest.matches(&submitted) {
            return Err(AuthError::ResetTokenInvalid);
        }

        // The new password does go through policy validation; a bad
        // password is the one failure reported distinctly, since the
        // caller has already proven possession of the token
        let raw_password = RawPassword::new(input.new_password)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        // Single statement: replace the password and clear digest,
        // expiry, and verified flag together, guarded on liveness. A
        // concurrent consume leaves zero rows and reads as invalid.
        let updated = self
            .cred_repo
            .consume_reset(user.user_id, &password_hash, now)
            .await?;
        if updated == 0 {
            return Err(AuthError::ResetTokenInvalid);
        }

        tracing::info!(user_id = %user.user_id, "Password reset consumed");

        Ok(())
    }
}
