use sqlx::PgExecutor;
use uuid::Uuid;

use crate::database::entities::comment::{CommentEntity, CommentWithAuthorRow};

pub struct CommentRepository;

impl CommentRepository {
    pub async fn insert(
        exec: impl PgExecutor<'_>,
        author_id: Uuid,
        post_id: Uuid,
        content: &str,
    ) -> Result<CommentEntity, sqlx::Error> {
        sqlx::query_as::<_, CommentEntity>(
            r#"
            INSERT INTO comments (content, author_id, post_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, author_id, post_id, created_at, updated_at
            "#,
        )
        .bind(content)
        .bind(author_id)
        .bind(post_id)
        .fetch_one(exec)
        .await
    }

    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        comment_id: Uuid,
    ) -> Result<Option<CommentEntity>, sqlx::Error> {
        sqlx::query_as::<_, CommentEntity>(
            r#"
            SELECT id, content, author_id, post_id, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(comment_id)
        .fetch_optional(exec)
        .await
    }

    /// 只取作者ID，供所有权判定使用
    pub async fn find_author_id(
        exec: impl PgExecutor<'_>,
        comment_id: Uuid,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        sqlx::query_scalar::<_, Uuid>("SELECT author_id FROM comments WHERE id = $1")
            .bind(comment_id)
            .fetch_optional(exec)
            .await
    }

    pub async fn update(
        exec: impl PgExecutor<'_>,
        comment_id: Uuid,
        content: &str,
    ) -> Result<Option<CommentEntity>, sqlx::Error> {
        sqlx::query_as::<_, CommentEntity>(
            r#"
            UPDATE comments
            SET content = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, content, author_id, post_id, created_at, updated_at
            "#,
        )
        .bind(comment_id)
        .bind(content)
        .fetch_optional(exec)
        .await
    }

    pub async fn delete(
        exec: impl PgExecutor<'_>,
        comment_id: Uuid,
    ) -> Result<Option<CommentEntity>, sqlx::Error> {
        sqlx::query_as::<_, CommentEntity>(
            r#"
            DELETE FROM comments
            WHERE id = $1
            RETURNING id, content, author_id, post_id, created_at, updated_at
            "#,
        )
        .bind(comment_id)
        .fetch_optional(exec)
        .await
    }

    /// 获取帖子下的全部评论（含作者昵称）
    pub async fn list_for_post(
        exec: impl PgExecutor<'_>,
        post_id: Uuid,
    ) -> Result<Vec<CommentWithAuthorRow>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthorRow>(
            r#"
            SELECT c.id, c.content, c.author_id, u.name AS author_name, c.created_at
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.post_id = $1
            ORDER BY c.created_at
            "#,
        )
        .bind(post_id)
        .fetch_all(exec)
        .await
    }
}
