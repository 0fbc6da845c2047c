//! Request Reset Use Case
//!
//! Issues a password-reset token and delivers it out-of-band.
//!
//! The response never depends on whether the user name exists: an
//! unknown name produces the same success as a known one, so the
//! endpoint cannot be used to enumerate registered accounts.

use chrono::Utc;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{CredentialRepository, ResetMailer, UserRepository};
use crate::domain::value_object::{reset_token::RawResetToken, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Request reset input
pub struct RequestResetInput {
    pub user_name: String,
}

/// Request reset use case
pub struct RequestResetUseCase<U, C, M>
where
    U: UserRepository,
    C: CredentialRepository,
    M: ResetMailer,
{
    user_repo: Arc<U>,
    cred_repo: Arc<C>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, C, M> RequestResetUseCase<U, C, M>
where
    U: UserRepository,
    C: CredentialRepository,
    M: ResetMailer,
{
    pub fn new(
        user_repo: Arc<U>,
        cred_repo: Arc<C>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            cred_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: RequestResetInput) -> AuthResult<()> {
        // A name that fails validation cannot belong to any account;
        // report the same success as for an unknown name
        let Ok(user_name) = UserName::new(input.user_name) else {
            tracing::debug!("Password reset requested with invalid user name");
            return Ok(());
        };

        let Some(user) = self.user_repo.find_by_user_name(&user_name).await? else {
            tracing::debug!("Password reset requested for unknown user name");
            return Ok(());
        };

        let raw_token = RawResetToken::generate();
        let digest = raw_token
            .digest()
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let expires_at = Utc::now() + self.config.reset_token_ttl;

        let updated = self
            .cred_repo
            .store_reset_token(user.user_id, &digest, expires_at)
            .await?;
        if updated == 0 {
            return Err(AuthError::Internal("Credentials not found".to_string()));
        }

        self.mailer
            .send_password_reset(user.user_name.original(), raw_token.as_str())
            .await?;

        tracing::info!(user_id = %user.user_id, "Password reset issued");

        Ok(())
    }
}
