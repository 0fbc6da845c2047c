//! Verify Reset Use Case
//!
//! Optional pre-check of a reset token before the password change.
//! Call sites may skip this and go straight to the reset; both paths
//! end in the same consumed state.
//!
//! Stored digests are one-way, so the token cannot be looked up by
//! key: every live digest is trial-compared until one matches. The
//! scan is linear in the number of pending resets.

use chrono::Utc;
use std::sync::Arc;

use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::reset_token::RawResetToken;
use crate::error::{AuthError, AuthResult};

/// Verify reset use case
pub struct VerifyResetUseCase<C>
where
    C: CredentialRepository,
{
    cred_repo: Arc<C>,
}

impl<C> VerifyResetUseCase<C>
where
    C: CredentialRepository,
{
    pub fn new(cred_repo: Arc<C>) -> Self {
        Self { cred_repo }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        let submitted = RawResetToken::from_submission(token);
        let now = Utc::now();

        let pending = self.cred_repo.find_pending_resets(now).await?;

        for credentials in &pending {
            let Some(reset) = credentials.live_reset(now) else {
                continue;
            };
            if !reset.token_digest.matches(&submitted) {
                continue;
            }

            // The statement re-checks liveness, so a token expiring
            // between the scan and the write marks nothing
            let updated = self
                .cred_repo
                .mark_reset_verified(credentials.user_id, now)
                .await?;
            if updated > 0 {
                tracing::info!(user_id = %credentials.user_id, "Reset token verified");
                return Ok(());
            }
        }

        // Expired, consumed, and never-issued tokens are indistinguishable
        Err(AuthError::ResetTokenInvalid)
    }
}
