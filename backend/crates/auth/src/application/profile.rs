//! Profile Use Cases
//!
//! Profile edits and explicit account deletion for the authenticated
//! caller.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Update profile input
pub struct UpdateProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Update profile use case
pub struct UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: UserId, input: UpdateProfileInput) -> AuthResult<User> {
        let updated = self
            .user_repo
            .update_profile(
                user_id,
                input.first_name.as_deref(),
                input.last_name.as_deref(),
            )
            .await?;
        if updated == 0 {
            return Err(AuthError::UserNotFound);
        }

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Delete account use case
///
/// Deleting a user cascades to their posts; authorship of their
/// comments lapses to none, and the comments stay.
pub struct DeleteAccountUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DeleteAccountUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: UserId) -> AuthResult<()> {
        let deleted = self.user_repo.delete(user_id).await?;
        if deleted == 0 {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "Account deleted");

        Ok(())
    }
}
