//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure
//! layer. Post mutations are conditional on ownership at the statement
//! level (owner in the WHERE clause, affected rows reported back), so
//! the authorize-and-mutate pair for posts is a single operation.

use kernel::id::{CommentId, PostId, UserId};

use crate::domain::entity::{comment::Comment, post::Post};
use crate::error::BlogResult;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Create a new post; the store assigns the id
    async fn create(&self, author_id: UserId, title: &str, body: &str) -> BlogResult<Post>;

    /// Find post by ID
    async fn find_by_id(&self, post_id: PostId) -> BlogResult<Option<Post>>;

    /// List posts, newest first
    async fn list(&self) -> BlogResult<Vec<Post>>;

    /// The post's owner, or `None` when the post does not exist
    async fn owner_of(&self, post_id: PostId) -> BlogResult<Option<UserId>>;

    /// Update title and body only if `author_id` owns the post; returns
    /// the updated post, or `None` when nothing matched
    async fn update_owned(
        &self,
        post_id: PostId,
        author_id: UserId,
        title: &str,
        body: &str,
    ) -> BlogResult<Option<Post>>;

    /// Delete only if `author_id` owns the post; returns affected rows
    async fn delete_owned(&self, post_id: PostId, author_id: UserId) -> BlogResult<u64>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Create a new comment on a post; the store assigns the id
    async fn create(&self, post_id: PostId, author_id: UserId, body: &str) -> BlogResult<Comment>;

    /// Find comment by ID
    async fn find_by_id(&self, comment_id: CommentId) -> BlogResult<Option<Comment>>;

    /// List a post's comments, oldest first
    async fn list_for_post(&self, post_id: PostId) -> BlogResult<Vec<Comment>>;

    /// Update the body; returns the updated comment, or `None` when the
    /// comment vanished between authorization and write
    async fn update_body(&self, comment_id: CommentId, body: &str) -> BlogResult<Option<Comment>>;

    /// Delete the comment; returns affected rows (zero when it was
    /// already gone)
    async fn delete(&self, comment_id: CommentId) -> BlogResult<u64>;
}
