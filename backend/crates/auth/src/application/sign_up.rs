//! Sign Up Use Case
//!
//! Creates a new user account with local credentials.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Sign up output
pub struct SignUpOutput {
    pub user: User,
}

/// Sign up use case
pub struct SignUpUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    user_repo: Arc<U>,
    cred_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> SignUpUseCase<U, C>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let user_name = UserName::new(input.user_name)
            .map_err(|e| AuthError::UserNameValidation(e.to_string()))?;

        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let raw_password = RawPassword::new(input.password)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = self
            .user_repo
            .create(
                &user_name,
                input.first_name.as_deref(),
                input.last_name.as_deref(),
            )
            .await?;

        self.cred_repo.create(user.user_id, &password_hash).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(SignUpOutput { user })
    }
}
