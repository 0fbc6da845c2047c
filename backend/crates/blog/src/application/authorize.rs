//! Edit Authority Resolution
//!
//! The two-tier ownership cascade consulted before any comment
//! mutation:
//!
//! 1. the comment's own author, when one is still recorded;
//! 2. failing that, the owner of the parent post.
//!
//! A comment whose author account was deleted (authorship lapsed to
//! none) must remain manageable by the parent post's owner, otherwise
//! orphaned comments could never be removed. Ownership is never
//! re-assigned; the parent owner is only a second authority consulted
//! when the first is absent or mismatched.
//!
//! The check and the following mutation are separate storage calls, so
//! two racing requests can both pass the check; this is tolerated
//! because the mutations themselves fail cleanly on an absent row.

use std::sync::Arc;

use kernel::id::{CommentId, UserId};

use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{BlogError, BlogResult};

/// Resolves whether a principal may mutate a comment
pub struct EditAuthority<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    posts: Arc<P>,
    comments: Arc<C>,
}

impl<P, C> EditAuthority<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    pub fn new(posts: Arc<P>, comments: Arc<C>) -> Self {
        Self { posts, comments }
    }

    /// Succeed if `acting` may edit or delete the comment
    pub async fn authorize_comment_edit(
        &self,
        comment_id: CommentId,
        acting: UserId,
    ) -> BlogResult<()> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or(BlogError::CommentNotFound)?;

        if comment.is_authored_by(acting) {
            return Ok(());
        }

        // Second lookup: authorship may have lapsed when the author
        // account was deleted, or it belongs to someone else entirely
        let parent_owner = self
            .posts
            .owner_of(comment.post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        if parent_owner == acting {
            return Ok(());
        }

        Err(BlogError::NotOwner)
    }
}
