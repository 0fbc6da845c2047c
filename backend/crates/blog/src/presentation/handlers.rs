//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;
use std::sync::Arc;

use auth::presentation::middleware::CurrentUser;
use kernel::id::{CommentId, PostId};

use crate::application::{
    CreateCommentUseCase, CreatePostUseCase, DeleteCommentUseCase, DeletePostUseCase,
    EditCommentUseCase, EditPostUseCase, GetPostUseCase, ListCommentsUseCase, ListPostsUseCase,
    PostContent,
};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::BlogResult;
use crate::presentation::dto::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, PostResponse, UpdateCommentRequest,
    UpdatePostRequest,
};

/// Shared state for blog handlers
#[derive(Clone)]
pub struct BlogAppState<R>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

// ============================================================================
// Posts
// ============================================================================

/// GET /api/posts
pub async fn list_posts<R>(
    State(state): State<BlogAppState<R>>,
) -> BlogResult<Json<Vec<PostResponse>>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let posts = ListPostsUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(posts.iter().map(PostResponse::from).collect()))
}

/// GET /api/posts/{id}
pub async fn get_post<R>(
    State(state): State<BlogAppState<R>>,
    Path(post_id): Path<i64>,
) -> BlogResult<Json<PostResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let post = GetPostUseCase::new(state.repo.clone())
        .execute(PostId::from_i64(post_id))
        .await?;

    Ok(Json(PostResponse::from(&post)))
}

/// POST /api/posts
pub async fn create_post<R>(
    State(state): State<BlogAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreatePostRequest>,
) -> BlogResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let post = CreatePostUseCase::new(state.repo.clone())
        .execute(
            current.user_id,
            PostContent {
                title: req.title,
                body: req.body,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(&post))))
}

/// PUT /api/posts/{id}
pub async fn update_post<R>(
    State(state): State<BlogAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
    Json(req): Json<UpdatePostRequest>,
) -> BlogResult<Json<PostResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let post = EditPostUseCase::new(state.repo.clone())
        .execute(
            PostId::from_i64(post_id),
            current.user_id,
            PostContent {
                title: req.title,
                body: req.body,
            },
        )
        .await?;

    Ok(Json(PostResponse::from(&post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post<R>(
    State(state): State<BlogAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
) -> BlogResult<StatusCode>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    DeletePostUseCase::new(state.repo.clone())
        .execute(PostId::from_i64(post_id), current.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Comments
// ============================================================================

/// GET /api/posts/{id}/comments
pub async fn list_comments<R>(
    State(state): State<BlogAppState<R>>,
    Path(post_id): Path<i64>,
) -> BlogResult<Json<Vec<CommentResponse>>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let comments = ListCommentsUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(PostId::from_i64(post_id))
        .await?;

    Ok(Json(comments.iter().map(CommentResponse::from).collect()))
}

/// POST /api/posts/{id}/comments
pub async fn create_comment<R>(
    State(state): State<BlogAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
    Json(req): Json<CreateCommentRequest>,
) -> BlogResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let comment = CreateCommentUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(PostId::from_i64(post_id), current.user_id, req.body)
        .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(&comment))))
}

/// PUT /api/comments/{id}
pub async fn update_comment<R>(
    State(state): State<BlogAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(comment_id): Path<i64>,
    Json(req): Json<UpdateCommentRequest>,
) -> BlogResult<Json<CommentResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let comment = EditCommentUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(CommentId::from_i64(comment_id), current.user_id, req.body)
        .await?;

    Ok(Json(CommentResponse::from(&comment)))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment<R>(
    State(state): State<BlogAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(comment_id): Path<i64>,
) -> BlogResult<StatusCode>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    DeleteCommentUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(CommentId::from_i64(comment_id), current.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
