//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;

use crate::domain::entity::{
    credentials::{Credentials, PendingReset},
    user::User,
};
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{
    reset_token::ResetTokenDigest, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(
        &self,
        user_name: &UserName,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (
                user_name,
                user_name_canonical,
                first_name,
                last_name
            ) VALUES ($1, $2, $3, $4)
            RETURNING
                user_id,
                user_name,
                user_name_canonical,
                first_name,
                last_name,
                created_at,
                updated_at
            "#,
        )
        .bind(user_name.original())
        .bind(user_name.canonical())
        .bind(first_name)
        .bind(last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_user())
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                user_name_canonical,
                first_name,
                last_name,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                user_name_canonical,
                first_name,
                last_name,
                created_at,
                updated_at
            FROM users
            WHERE user_name_canonical = $1
            "#,
        )
        .bind(user_name.canonical())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_name_canonical = $1)",
        )
        .bind(user_name.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> AuthResult<u64> {
        let updated = sqlx::query(
            r#"
            UPDATE users SET
                first_name = $2,
                last_name = $3,
                updated_at = now()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .bind(first_name)
        .bind(last_name)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated)
    }

    async fn delete(&self, user_id: UserId) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Credential Repository Implementation
// ============================================================================

impl CredentialRepository for PgAuthRepository {
    async fn create(&self, user_id: UserId, password_hash: &UserPassword) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO credentials (
                user_id,
                password_hash
            ) VALUES ($1, $2)
            "#,
        )
        .bind(user_id.as_i64())
        .bind(password_hash.as_phc_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AuthResult<Option<Credentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT
                user_id,
                password_hash,
                reset_token_hash,
                reset_token_expires_at,
                reset_verified,
                created_at,
                updated_at
            FROM credentials
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_credentials()).transpose()
    }

    async fn update_password(
        &self,
        user_id: UserId,
        password_hash: &UserPassword,
    ) -> AuthResult<u64> {
        let updated = sqlx::query(
            r#"
            UPDATE credentials SET
                password_hash = $2,
                updated_at = now()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .bind(password_hash.as_phc_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated)
    }

    async fn store_reset_token(
        &self,
        user_id: UserId,
        digest: &ResetTokenDigest,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<u64> {
        // Digest, expiry, and the cleared verified flag move in one
        // statement so no partial reset state is ever visible
        let updated = sqlx::query(
            r#"
            UPDATE credentials SET
                reset_token_hash = $2,
                reset_token_expires_at = $3,
                reset_verified = FALSE,
                updated_at = now()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .bind(digest.as_phc_string())
        .bind(expires_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated)
    }

    async fn mark_reset_verified(&self, user_id: UserId, now: DateTime<Utc>) -> AuthResult<u64> {
        let updated = sqlx::query(
            r#"
            UPDATE credentials SET
                reset_verified = TRUE,
                updated_at = now()
            WHERE user_id = $1
              AND reset_token_hash IS NOT NULL
              AND reset_token_expires_at > $2
            "#,
        )
        .bind(user_id.as_i64())
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated)
    }

    async fn consume_reset(
        &self,
        user_id: UserId,
        new_password_hash: &UserPassword,
        now: DateTime<Utc>,
    ) -> AuthResult<u64> {
        // Guarded on a still-live token: a concurrent consume or an
        // expiry between read and write matches zero rows
        let updated = sqlx::query(
            r#"
            UPDATE credentials SET
                password_hash = $2,
                reset_token_hash = NULL,
                reset_token_expires_at = NULL,
                reset_verified = FALSE,
                updated_at = now()
            WHERE user_id = $1
              AND reset_token_hash IS NOT NULL
              AND reset_token_expires_at > $3
            "#,
        )
        .bind(user_id.as_i64())
        .bind(new_password_hash.as_phc_string())
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated)
    }

    async fn find_pending_resets(&self, now: DateTime<Utc>) -> AuthResult<Vec<Credentials>> {
        let rows = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT
                user_id,
                password_hash,
                reset_token_hash,
                reset_token_expires_at,
                reset_verified,
                created_at,
                updated_at
            FROM credentials
            WHERE reset_token_hash IS NOT NULL
              AND reset_token_expires_at > $1
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_credentials()).collect()
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    user_name: String,
    #[allow(dead_code)]
    user_name_canonical: String,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_i64(self.user_id),
            user_name: UserName::from_db(&self.user_name),
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    user_id: i64,
    password_hash: Option<String>,
    reset_token_hash: Option<String>,
    reset_token_expires_at: Option<DateTime<Utc>>,
    reset_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CredentialsRow {
    fn into_credentials(self) -> AuthResult<Credentials> {
        let password_hash = self
            .password_hash
            .map(UserPassword::from_phc_string)
            .transpose()
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        let pending_reset = match (self.reset_token_hash, self.reset_token_expires_at) {
            (Some(hash), Some(expires_at)) => Some(PendingReset {
                token_digest: ResetTokenDigest::from_phc_string(hash)
                    .map_err(|e| AuthError::Internal(format!("Invalid reset digest: {}", e)))?,
                expires_at,
            }),
            (None, None) => None,
            _ => {
                return Err(AuthError::Internal(
                    "Reset token state is inconsistent".to_string(),
                ));
            }
        };

        Ok(Credentials {
            user_id: UserId::from_i64(self.user_id),
            password_hash,
            pending_reset,
            reset_verified: self.reset_verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
