//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, DeleteAccountUseCase, RequestResetInput,
    RequestResetUseCase, ResetPasswordInput, ResetPasswordUseCase, SignInInput, SignInUseCase,
    SignUpInput, SignUpUseCase, UpdateProfileInput, UpdateProfileUseCase, VerifyResetUseCase,
};
use crate::domain::repository::{CredentialRepository, ResetMailer, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse,
    RegisterRequest, ResetPasswordRequest, UpdateProfileRequest, UserResponse, VerifyResetRequest,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /api/auth/register
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            user_name: req.user_name,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&output.user))))
}

/// POST /api/auth/login
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            user_name: req.user_name,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        user: UserResponse::from(&output.user),
    }))
}

// ============================================================================
// Password reset
// ============================================================================

/// POST /api/auth/forgot-password
///
/// Succeeds with the same body whether or not the user name exists.
pub async fn forgot_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let use_case = RequestResetUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    use_case
        .execute(RequestResetInput {
            user_name: req.user_name,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Check your email".to_string(),
    }))
}

/// POST /api/auth/verify-reset
pub async fn verify_reset<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<VerifyResetRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let use_case = VerifyResetUseCase::new(state.repo.clone());

    use_case.execute(&req.token).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/auth/reset-password
pub async fn reset_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let use_case =
        ResetPasswordUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    use_case
        .execute(ResetPasswordInput {
            user_name: req.user_name,
            token: req.token,
            new_password: req.new_password,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/auth/change-password
pub async fn change_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(
            current.user_id,
            ChangePasswordInput {
                current_password: req.current_password,
                new_password: req.new_password,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/auth/me
pub async fn me<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(current): Extension<CurrentUser>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let user = state
        .repo
        .find_by_id(current.user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/auth/profile
pub async fn update_profile<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let use_case = UpdateProfileUseCase::new(state.repo.clone());

    let user = use_case
        .execute(
            current.user_id,
            UpdateProfileInput {
                first_name: req.first_name,
                last_name: req.last_name,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/auth/account
pub async fn delete_account<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(current): Extension<CurrentUser>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let use_case = DeleteAccountUseCase::new(state.repo.clone());

    use_case.execute(current.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
