//! Comment Use Cases
//!
//! Comment mutations consult the two-tier edit authority first, then
//! mutate. The two steps are separate storage calls; a comment that
//! disappears in between makes the mutation miss zero rows, which is
//! reported as not-found rather than corrupting anything.

use std::sync::Arc;

use kernel::id::{CommentId, PostId, UserId};

use crate::application::authorize::EditAuthority;
use crate::domain::entity::comment::Comment;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{BlogError, BlogResult};

/// Create comment use case
///
/// Any authenticated user may comment on any existing post.
pub struct CreateCommentUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    posts: Arc<P>,
    comments: Arc<C>,
}

impl<P, C> CreateCommentUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    pub fn new(posts: Arc<P>, comments: Arc<C>) -> Self {
        Self { posts, comments }
    }

    pub async fn execute(
        &self,
        post_id: PostId,
        author: UserId,
        body: String,
    ) -> BlogResult<Comment> {
        self.posts
            .owner_of(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        let comment = self.comments.create(post_id, author, &body).await?;

        tracing::info!(
            comment_id = %comment.comment_id,
            post_id = %post_id,
            author_id = %author,
            "Comment created"
        );

        Ok(comment)
    }
}

/// Edit comment use case
pub struct EditCommentUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    authority: EditAuthority<P, C>,
    comments: Arc<C>,
}

impl<P, C> EditCommentUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    pub fn new(posts: Arc<P>, comments: Arc<C>) -> Self {
        Self {
            authority: EditAuthority::new(posts, comments.clone()),
            comments,
        }
    }

    pub async fn execute(
        &self,
        comment_id: CommentId,
        acting: UserId,
        body: String,
    ) -> BlogResult<Comment> {
        self.authority
            .authorize_comment_edit(comment_id, acting)
            .await?;

        self.comments
            .update_body(comment_id, &body)
            .await?
            .ok_or(BlogError::CommentNotFound)
    }
}

/// Delete comment use case
pub struct DeleteCommentUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    authority: EditAuthority<P, C>,
    comments: Arc<C>,
}

impl<P, C> DeleteCommentUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    pub fn new(posts: Arc<P>, comments: Arc<C>) -> Self {
        Self {
            authority: EditAuthority::new(posts, comments.clone()),
            comments,
        }
    }

    pub async fn execute(&self, comment_id: CommentId, acting: UserId) -> BlogResult<()> {
        self.authority
            .authorize_comment_edit(comment_id, acting)
            .await?;

        let deleted = self.comments.delete(comment_id).await?;
        if deleted == 0 {
            return Err(BlogError::CommentNotFound);
        }

        tracing::info!(comment_id = %comment_id, acting_id = %acting, "Comment deleted");

        Ok(())
    }
}

/// List comments use case
pub struct ListCommentsUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    posts: Arc<P>,
    comments: Arc<C>,
}

impl<P, C> ListCommentsUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    pub fn new(posts: Arc<P>, comments: Arc<C>) -> Self {
        Self { posts, comments }
    }

    pub async fn execute(&self, post_id: PostId) -> BlogResult<Vec<Comment>> {
        self.posts
            .owner_of(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        self.comments.list_for_post(post_id).await
    }
}
