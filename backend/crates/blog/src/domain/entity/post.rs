//! Post Entity

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

/// Post entity
///
/// Always has an author; deleting the author deletes the post.
#[derive(Debug, Clone)]
pub struct Post {
    /// Database-assigned identifier
    pub post_id: PostId,
    /// Owning user (required)
    pub author_id: UserId,
    /// Title
    pub title: String,
    /// Body content
    pub body: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Whether the given user owns this post
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}
