//! Auth Router

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{CredentialRepository, ResetMailer, UserRepository};
use crate::infra::mailer::HttpResetMailer;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer_auth;

/// Create the Auth router with PostgreSQL repository and HTTP mailer
pub fn auth_router(repo: PgAuthRepository, mailer: HttpResetMailer, config: AuthConfig) -> Router {
    auth_router_generic(repo, mailer, config)
}

/// Create a generic Auth router for any repository/mailer implementation
pub fn auth_router_generic<R, M>(repo: R, mailer: M, config: AuthConfig) -> Router
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        config: config.clone(),
    };

    let public = Router::new()
        .route("/register", post(handlers::register::<R, M>))
        .route("/login", post(handlers::login::<R, M>))
        .route("/forgot-password", post(handlers::forgot_password::<R, M>))
        .route("/verify-reset", post(handlers::verify_reset::<R, M>))
        .route("/reset-password", post(handlers::reset_password::<R, M>));

    let protected = Router::new()
        .route("/me", get(handlers::me::<R, M>))
        .route("/profile", put(handlers::update_profile::<R, M>))
        .route("/change-password", post(handlers::change_password::<R, M>))
        .route("/account", delete(handlers::delete_account::<R, M>))
        .route_layer(middleware::from_fn_with_state(config, require_bearer_auth));

    public.merge(protected).with_state(state)
}
