//! Application Layer
//!
//! Use cases, including edit-authority resolution.

pub mod authorize;
pub mod comments;
pub mod posts;

// Re-exports
pub use authorize::EditAuthority;
pub use comments::{
    CreateCommentUseCase, DeleteCommentUseCase, EditCommentUseCase, ListCommentsUseCase,
};
pub use posts::{
    CreatePostUseCase, DeletePostUseCase, EditPostUseCase, GetPostUseCase, ListPostsUseCase,
    PostContent,
};
