//! Change Password Use Case
//!
//! Password change for an already-authenticated caller. Distinct from
//! the reset flow: possession of a valid session plus the current
//! password is the authority here, no token involved.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Change password input
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<C>
where
    C: CredentialRepository,
{
    cred_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<C> ChangePasswordUseCase<C>
where
    C: CredentialRepository,
{
    pub fn new(cred_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self { cred_repo, config }
    }

    pub async fn execute(&self, user_id: UserId, input: ChangePasswordInput) -> AuthResult<()> {
        let credentials = self
            .cred_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // No local password at all is its own condition, not a wrong
        // password
        let password_hash = credentials
            .password_hash
            .as_ref()
            .ok_or(AuthError::PasswordNotSet)?;

        let current = RawPassword::for_verification(input.current_password);
        if !password_hash.verify(&current, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let raw_new = RawPassword::new(input.new_password)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))?;
        let new_hash = UserPassword::from_raw(&raw_new, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let updated = self.cred_repo.update_password(user_id, &new_hash).await?;
        if updated == 0 {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "Password changed");

        Ok(())
    }
}
