//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};
use sqlx::PgPool;

use crate::domain::entity::{comment::Comment, post::Post};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::BlogResult;

/// PostgreSQL-backed blog repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgBlogRepository {
    async fn create(&self, author_id: UserId, title: &str, body: &str) -> BlogResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (
                author_id,
                title,
                body
            ) VALUES ($1, $2, $3)
            RETURNING
                post_id,
                author_id,
                title,
                body,
                created_at,
                updated_at
            "#,
        )
        .bind(author_id.as_i64())
        .bind(title)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_post())
    }

    async fn find_by_id(&self, post_id: PostId) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                post_id,
                author_id,
                title,
                body,
                created_at,
                updated_at
            FROM posts
            WHERE post_id = $1
            "#,
        )
        .bind(post_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_post()))
    }

    async fn list(&self) -> BlogResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                post_id,
                author_id,
                title,
                body,
                created_at,
                updated_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_post()).collect())
    }

    async fn owner_of(&self, post_id: PostId) -> BlogResult<Option<UserId>> {
        let owner = sqlx::query_scalar::<_, i64>(
            "SELECT author_id FROM posts WHERE post_id = $1",
        )
        .bind(post_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner.map(UserId::from_i64))
    }

    async fn update_owned(
        &self,
        post_id: PostId,
        author_id: UserId,
        title: &str,
        body: &str,
    ) -> BlogResult<Option<Post>> {
        // Ownership is part of the statement, so check and mutation
        // cannot be interleaved
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts SET
                title = $3,
                body = $4,
                updated_at = now()
            WHERE post_id = $1 AND author_id = $2
            RETURNING
                post_id,
                author_id,
                title,
                body,
                created_at,
                updated_at
            "#,
        )
        .bind(post_id.as_i64())
        .bind(author_id.as_i64())
        .bind(title)
        .bind(body)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_post()))
    }

    async fn delete_owned(&self, post_id: PostId, author_id: UserId) -> BlogResult<u64> {
        let deleted = sqlx::query("DELETE FROM posts WHERE post_id = $1 AND author_id = $2")
            .bind(post_id.as_i64())
            .bind(author_id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgBlogRepository {
    async fn create(&self, post_id: PostId, author_id: UserId, body: &str) -> BlogResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (
                post_id,
                author_id,
                body
            ) VALUES ($1, $2, $3)
            RETURNING
                comment_id,
                post_id,
                author_id,
                body,
                created_at,
                updated_at
            "#,
        )
        .bind(post_id.as_i64())
        .bind(author_id.as_i64())
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_comment())
    }

    async fn find_by_id(&self, comment_id: CommentId) -> BlogResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                comment_id,
                post_id,
                author_id,
                body,
                created_at,
                updated_at
            FROM comments
            WHERE comment_id = $1
            "#,
        )
        .bind(comment_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_comment()))
    }

    async fn list_for_post(&self, post_id: PostId) -> BlogResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                comment_id,
                post_id,
                author_id,
                body,
                created_at,
                updated_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(post_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_comment()).collect())
    }

    async fn update_body(&self, comment_id: CommentId, body: &str) -> BlogResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments SET
                body = $2,
                updated_at = now()
            WHERE comment_id = $1
            RETURNING
                comment_id,
                post_id,
                author_id,
                body,
                created_at,
                updated_at
            "#,
        )
        .bind(comment_id.as_i64())
        .bind(body)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_comment()))
    }

    async fn delete(&self, comment_id: CommentId) -> BlogResult<u64> {
        let deleted = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: i64,
    author_id: i64,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::from_i64(self.post_id),
            author_id: UserId::from_i64(self.author_id),
            title: self.title,
            body: self.body,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: i64,
    post_id: i64,
    author_id: Option<i64>,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_i64(self.comment_id),
            post_id: PostId::from_i64(self.post_id),
            author_id: self.author_id.map(UserId::from_i64),
            body: self.body,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
