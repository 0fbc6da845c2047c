//! Unit tests for the ownership cascade
//!
//! An in-memory repository drives the edit-authority resolution and the
//! post/comment mutation paths, without a database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use kernel::id::{CommentId, PostId, UserId};

use crate::application::{
    CreateCommentUseCase, CreatePostUseCase, DeleteCommentUseCase, DeletePostUseCase,
    EditAuthority, EditCommentUseCase, EditPostUseCase, PostContent,
};
use crate::domain::entity::{comment::Comment, post::Post};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{BlogError, BlogResult};

// ============================================================================
// In-memory double
// ============================================================================

#[derive(Default)]
struct Store {
    next_id: i64,
    posts: HashMap<i64, Post>,
    comments: HashMap<i64, Comment>,
}

#[derive(Clone, Default)]
struct MemoryBlogRepository {
    inner: Arc<Mutex<Store>>,
}

impl MemoryBlogRepository {
    /// Mimic the author account being deleted: authorship lapses to
    /// none, the comment stays
    fn orphan_comments_of(&self, author: UserId) {
        let mut store = self.inner.lock().unwrap();
        for comment in store.comments.values_mut() {
            if comment.author_id == Some(author) {
                comment.author_id = None;
            }
        }
    }

    fn remove_comment(&self, comment_id: CommentId) {
        self.inner
            .lock()
            .unwrap()
            .comments
            .remove(&comment_id.as_i64());
    }
}

impl PostRepository for MemoryBlogRepository {
    async fn create(&self, author_id: UserId, title: &str, body: &str) -> BlogResult<Post> {
        let mut store = self.inner.lock().unwrap();
        store.next_id += 1;
        let id = store.next_id;
        let now = Utc::now();
        let post = Post {
            post_id: PostId::from_i64(id),
            author_id,
            title: title.to_string(),
            body: body.to_string(),
            created_at: now,
            updated_at: now,
        };
        store.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, post_id: PostId) -> BlogResult<Option<Post>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .posts
            .get(&post_id.as_i64())
            .cloned())
    }

    async fn list(&self) -> BlogResult<Vec<Post>> {
        Ok(self.inner.lock().unwrap().posts.values().cloned().collect())
    }

    async fn owner_of(&self, post_id: PostId) -> BlogResult<Option<UserId>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .posts
            .get(&post_id.as_i64())
            .map(|p| p.author_id))
    }

    async fn update_owned(
        &self,
        post_id: PostId,
        author_id: UserId,
        title: &str,
        body: &str,
    ) -> BlogResult<Option<Post>> {
        let mut store = self.inner.lock().unwrap();
        match store.posts.get_mut(&post_id.as_i64()) {
            Some(post) if post.author_id == author_id => {
                post.title = title.to_string();
                post.body = body.to_string();
                post.updated_at = Utc::now();
                Ok(Some(post.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_owned(&self, post_id: PostId, author_id: UserId) -> BlogResult<u64> {
        let mut store = self.inner.lock().unwrap();
        let owned = store
            .posts
            .get(&post_id.as_i64())
            .is_some_and(|p| p.author_id == author_id);
        if !owned {
            return Ok(0);
        }
        store.posts.remove(&post_id.as_i64());
        store
            .comments
            .retain(|_, c| c.post_id != post_id);
        Ok(1)
    }
}

impl CommentRepository for MemoryBlogRepository {
    async fn create(&self, post_id: PostId, author_id: UserId, body: &str) -> BlogResult<Comment> {
        let mut store = self.inner.lock().unwrap();
        store.next_id += 1;
        let id = store.next_id;
        let now = Utc::now();
        let comment = Comment {
            comment_id: CommentId::from_i64(id),
            post_id,
            author_id: Some(author_id),
            body: body.to_string(),
            created_at: now,
            updated_at: now,
        };
        store.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, comment_id: CommentId) -> BlogResult<Option<Comment>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .comments
            .get(&comment_id.as_i64())
            .cloned())
    }

    async fn list_for_post(&self, post_id: PostId) -> BlogResult<Vec<Comment>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn update_body(&self, comment_id: CommentId, body: &str) -> BlogResult<Option<Comment>> {
        let mut store = self.inner.lock().unwrap();
        match store.comments.get_mut(&comment_id.as_i64()) {
            Some(comment) => {
                comment.body = body.to_string();
                comment.updated_at = Utc::now();
                Ok(Some(comment.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, comment_id: CommentId) -> BlogResult<u64> {
        let mut store = self.inner.lock().unwrap();
        Ok(store
            .comments
            .remove(&comment_id.as_i64())
            .map_or(0, |_| 1))
    }
}

// ============================================================================
// Fixture
// ============================================================================

struct Fixture {
    repo: Arc<MemoryBlogRepository>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            repo: Arc::new(MemoryBlogRepository::default()),
        }
    }

    fn authority(&self) -> EditAuthority<MemoryBlogRepository, MemoryBlogRepository> {
        EditAuthority::new(self.repo.clone(), self.repo.clone())
    }

    async fn post(&self, owner: UserId) -> PostId {
        CreatePostUseCase::new(self.repo.clone())
            .execute(
                owner,
                PostContent {
                    title: "First post".to_string(),
                    body: "Hello".to_string(),
                },
            )
            .await
            .unwrap()
            .post_id
    }

    async fn comment(&self, post_id: PostId, author: UserId) -> CommentId {
        CreateCommentUseCase::new(self.repo.clone(), self.repo.clone())
            .execute(post_id, author, "Nice post".to_string())
            .await
            .unwrap()
            .comment_id
    }
}

fn user(id: i64) -> UserId {
    UserId::from_i64(id)
}

// ============================================================================
// Ownership cascade
// ============================================================================

#[tokio::test]
async fn test_author_may_edit_own_comment() {
    let fx = Fixture::new();
    let post = fx.post(user(1)).await;
    let comment = fx.comment(post, user(2)).await;

    fx.authority()
        .authorize_comment_edit(comment, user(2))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_parent_owner_may_edit_live_authored_comment() {
    let fx = Fixture::new();
    let post = fx.post(user(1)).await;
    let comment = fx.comment(post, user(2)).await;

    fx.authority()
        .authorize_comment_edit(comment, user(1))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_third_party_is_forbidden() {
    let fx = Fixture::new();
    let post = fx.post(user(1)).await;
    let comment = fx.comment(post, user(2)).await;

    let result = fx.authority().authorize_comment_edit(comment, user(3)).await;
    assert!(matches!(result, Err(BlogError::NotOwner)));
}

#[tokio::test]
async fn test_orphaned_comment_falls_back_to_parent_owner() {
    // A owns the post, B commented, B's account is deleted
    let fx = Fixture::new();
    let post = fx.post(user(1)).await;
    let comment = fx.comment(post, user(2)).await;
    fx.repo.orphan_comments_of(user(2));

    // The parent owner can still remove it
    DeleteCommentUseCase::new(fx.repo.clone(), fx.repo.clone())
        .execute(comment, user(1))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_orphaned_comment_still_forbidden_to_third_party() {
    let fx = Fixture::new();
    let post = fx.post(user(1)).await;
    let comment = fx.comment(post, user(2)).await;
    fx.repo.orphan_comments_of(user(2));

    let result = fx.authority().authorize_comment_edit(comment, user(3)).await;
    assert!(matches!(result, Err(BlogError::NotOwner)));
}

#[tokio::test]
async fn test_missing_comment_is_not_found() {
    let fx = Fixture::new();
    let result = fx
        .authority()
        .authorize_comment_edit(CommentId::from_i64(999), user(1))
        .await;
    assert!(matches!(result, Err(BlogError::CommentNotFound)));
}

#[tokio::test]
async fn test_comment_vanishing_after_authorization_fails_cleanly() {
    let fx = Fixture::new();
    let post = fx.post(user(1)).await;
    let comment = fx.comment(post, user(2)).await;

    // First delete wins; the second passes authorization against stale
    // state in a real race, but the zero-row mutation reads as gone
    let use_case = DeleteCommentUseCase::new(fx.repo.clone(), fx.repo.clone());
    use_case.execute(comment, user(2)).await.unwrap();
    let result = use_case.execute(comment, user(2)).await;
    assert!(matches!(result, Err(BlogError::CommentNotFound)));
}

#[tokio::test]
async fn test_edit_comment_by_parent_owner_changes_body() {
    let fx = Fixture::new();
    let post = fx.post(user(1)).await;
    let comment = fx.comment(post, user(2)).await;
    fx.repo.orphan_comments_of(user(2));

    let updated = EditCommentUseCase::new(fx.repo.clone(), fx.repo.clone())
        .execute(comment, user(1), "moderated".to_string())
        .await
        .unwrap();
    assert_eq!(updated.body, "moderated");
}

// ============================================================================
// Post mutations (no parent tier)
// ============================================================================

#[tokio::test]
async fn test_post_owner_may_edit() {
    let fx = Fixture::new();
    let post = fx.post(user(1)).await;

    let updated = EditPostUseCase::new(fx.repo.clone())
        .execute(
            post,
            user(1),
            PostContent {
                title: "Edited".to_string(),
                body: "Changed".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Edited");
}

#[tokio::test]
async fn test_post_non_owner_is_forbidden_not_found_is_distinct() {
    let fx = Fixture::new();
    let post = fx.post(user(1)).await;

    let edit = EditPostUseCase::new(fx.repo.clone());
    let forbidden = edit
        .execute(
            post,
            user(2),
            PostContent {
                title: "Hijack".to_string(),
                body: "Nope".to_string(),
            },
        )
        .await;
    assert!(matches!(forbidden, Err(BlogError::NotOwner)));

    let missing = edit
        .execute(
            PostId::from_i64(999),
            user(1),
            PostContent {
                title: "Ghost".to_string(),
                body: "Gone".to_string(),
            },
        )
        .await;
    assert!(matches!(missing, Err(BlogError::PostNotFound)));
}

#[tokio::test]
async fn test_post_delete_is_owner_conditional() {
    let fx = Fixture::new();
    let post = fx.post(user(1)).await;

    let delete = DeletePostUseCase::new(fx.repo.clone());
    assert!(matches!(
        delete.execute(post, user(2)).await,
        Err(BlogError::NotOwner)
    ));
    delete.execute(post, user(1)).await.unwrap();
    assert!(matches!(
        delete.execute(post, user(1)).await,
        Err(BlogError::PostNotFound)
    ));
}

#[tokio::test]
async fn test_comment_on_missing_post_is_not_found() {
    let fx = Fixture::new();
    let result = CreateCommentUseCase::new(fx.repo.clone(), fx.repo.clone())
        .execute(PostId::from_i64(999), user(1), "hello?".to_string())
        .await;
    assert!(matches!(result, Err(BlogError::PostNotFound)));
}

#[tokio::test]
async fn test_stale_authorization_then_vanished_comment_edit() {
    let fx = Fixture::new();
    let post = fx.post(user(1)).await;
    let comment = fx.comment(post, user(2)).await;

    // Simulate the race window: the comment is gone right after the
    // authority check would have passed
    fx.repo.remove_comment(comment);

    let result = EditCommentUseCase::new(fx.repo.clone(), fx.repo.clone())
        .execute(comment, user(2), "late edit".to_string())
        .await;
    assert!(matches!(result, Err(BlogError::CommentNotFound)));
}
