//! Comment Entity

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};

/// Comment entity
///
/// The parent post always exists while the comment exists; the author
/// reference lapses to `None` when the author account is deleted, and
/// the comment itself stays.
#[derive(Debug, Clone)]
pub struct Comment {
    /// Database-assigned identifier
    pub comment_id: CommentId,
    /// Parent post (required)
    pub post_id: PostId,
    /// Authoring user, if the account still exists
    pub author_id: Option<UserId>,
    /// Body content
    pub body: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Whether the given user authored this comment
    ///
    /// Always false when authorship has lapsed.
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == Some(user_id)
    }
}
