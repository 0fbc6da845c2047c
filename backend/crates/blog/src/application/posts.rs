//! Post Use Cases
//!
//! Post mutations authorize and mutate in a single conditional
//! statement (owner in the WHERE clause). A miss is split into "no such
//! post" and "not yours" by one follow-up probe.

use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};

/// Post content input
pub struct PostContent {
    pub title: String,
    pub body: String,
}

/// Create post use case
pub struct CreatePostUseCase<P>
where
    P: PostRepository,
{
    posts: Arc<P>,
}

impl<P> CreatePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self, author: UserId, input: PostContent) -> BlogResult<Post> {
        let post = self
            .posts
            .create(author, &input.title, &input.body)
            .await?;

        tracing::info!(post_id = %post.post_id, author_id = %author, "Post created");

        Ok(post)
    }
}

/// Edit post use case
pub struct EditPostUseCase<P>
where
    P: PostRepository,
{
    posts: Arc<P>,
}

impl<P> EditPostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }

    pub async fn execute(
        &self,
        post_id: PostId,
        acting: UserId,
        input: PostContent,
    ) -> BlogResult<Post> {
        match self
            .posts
            .update_owned(post_id, acting, &input.title, &input.body)
            .await?
        {
            Some(post) => Ok(post),
            None => match self.posts.owner_of(post_id).await? {
                None => Err(BlogError::PostNotFound),
                Some(_) => Err(BlogError::NotOwner),
            },
        }
    }
}

/// Delete post use case
pub struct DeletePostUseCase<P>
where
    P: PostRepository,
{
    posts: Arc<P>,
}

impl<P> DeletePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self, post_id: PostId, acting: UserId) -> BlogResult<()> {
        let deleted = self.posts.delete_owned(post_id, acting).await?;
        if deleted > 0 {
            tracing::info!(post_id = %post_id, author_id = %acting, "Post deleted");
            return Ok(());
        }

        match self.posts.owner_of(post_id).await? {
            None => Err(BlogError::PostNotFound),
            Some(_) => Err(BlogError::NotOwner),
        }
    }
}

/// Get post use case
pub struct GetPostUseCase<P>
where
    P: PostRepository,
{
    posts: Arc<P>,
}

impl<P> GetPostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self, post_id: PostId) -> BlogResult<Post> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)
    }
}

/// List posts use case
pub struct ListPostsUseCase<P>
where
    P: PostRepository,
{
    posts: Arc<P>,
}

impl<P> ListPostsUseCase<P>
where
    P: PostRepository,
{
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self) -> BlogResult<Vec<Post>> {
        self.posts.list().await
    }
}
