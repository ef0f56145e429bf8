use sqlx::PgExecutor;
use uuid::Uuid;

use crate::database::entities::post::PostEntity;

pub struct PostRepository;

impl PostRepository {
    pub async fn insert(
        exec: impl PgExecutor<'_>,
        author_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<PostEntity, sqlx::Error> {
        sqlx::query_as::<_, PostEntity>(
            r#"
            INSERT INTO posts (title, content, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, author_id, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(author_id)
        .fetch_one(exec)
        .await
    }

    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        post_id: Uuid,
    ) -> Result<Option<PostEntity>, sqlx::Error> {
        sqlx::query_as::<_, PostEntity>(
            r#"
            SELECT id, title, content, author_id, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(exec)
        .await
    }

    /// 只取作者ID，供所有权判定使用
    pub async fn find_author_id(
        exec: impl PgExecutor<'_>,
        post_id: Uuid,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        sqlx::query_scalar::<_, Uuid>("SELECT author_id FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(exec)
            .await
    }

    pub async fn exists(exec: impl PgExecutor<'_>, post_id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(post_id)
            .fetch_one(exec)
            .await
    }

    pub async fn update(
        exec: impl PgExecutor<'_>,
        post_id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<PostEntity>, sqlx::Error> {
        sqlx::query_as::<_, PostEntity>(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                updated_at = now()
            WHERE id = $1
            RETURNING id, title, content, author_id, created_at, updated_at
            "#,
        )
        .bind(post_id)
        .bind(title)
        .bind(content)
        .fetch_optional(exec)
        .await
    }

    pub async fn delete(
        exec: impl PgExecutor<'_>,
        post_id: Uuid,
    ) -> Result<Option<PostEntity>, sqlx::Error> {
        sqlx::query_as::<_, PostEntity>(
            r#"
            DELETE FROM posts
            WHERE id = $1
            RETURNING id, title, content, author_id, created_at, updated_at
            "#,
        )
        .bind(post_id)
        .fetch_optional(exec)
        .await
    }
}
