//! Blog Router
//!
//! Reads are public; every mutation sits behind the bearer-token guard.

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use auth::application::config::AuthConfig;
use auth::presentation::middleware::require_bearer_auth;

use crate::domain::repository::{CommentRepository, PostRepository};
use crate::infra::postgres::PgBlogRepository;
use crate::presentation::handlers::{self, BlogAppState};

/// Create the Blog router with PostgreSQL repository
pub fn blog_router(repo: PgBlogRepository, config: Arc<AuthConfig>) -> Router {
    blog_router_generic(repo, config)
}

/// Create a generic Blog router for any repository implementation
pub fn blog_router_generic<R>(repo: R, config: Arc<AuthConfig>) -> Router
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let state = BlogAppState {
        repo: Arc::new(repo),
    };

    let public = Router::new()
        .route("/posts", get(handlers::list_posts::<R>))
        .route("/posts/{id}", get(handlers::get_post::<R>))
        .route("/posts/{id}/comments", get(handlers::list_comments::<R>));

    let protected = Router::new()
        .route("/posts", post(handlers::create_post::<R>))
        .route(
            "/posts/{id}",
            put(handlers::update_post::<R>).delete(handlers::delete_post::<R>),
        )
        .route("/posts/{id}/comments", post(handlers::create_comment::<R>))
        .route(
            "/comments/{id}",
            put(handlers::update_comment::<R>).delete(handlers::delete_comment::<R>),
        )
        .route_layer(middleware::from_fn_with_state(config, require_bearer_auth));

    public.merge(protected).with_state(state)
}
