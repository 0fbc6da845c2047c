//! Sign In Use Case
//!
//! Authenticates a user and issues a bearer token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Signed bearer token
    pub token: String,
    pub user: User,
}

/// Sign in use case
pub struct SignInUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    user_repo: Arc<U>,
    cred_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> SignInUseCase<U, C>
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

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // Unknown user and wrong password collapse to one failure
        let user_name =
            UserName::new(input.user_name).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let credentials = self
            .cred_repo
            .find_by_user_id(user.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal("Credentials not found".to_string()))?;

        let password_hash = credentials
            .password_hash
            .as_ref()
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::for_verification(input.password);
        if !password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let secret = self
            .config
            .token_secret()
            .ok_or(AuthError::TokenSecretMissing)?;

        let token =
            platform::token::issue(secret, user.user_id.as_i64(), self.config.token_ttl)?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput { token, user })
    }
}
