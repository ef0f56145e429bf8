// 用户存储库
// 包含用户和用户资料的数据库操作

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::database::entities::user::{ProfileEntity, UserEntity};

pub struct UserRepository;

impl UserRepository {
    /// 检查用户是否存在
    pub async fn exists(exec: impl PgExecutor<'_>, user_id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(exec)
            .await
    }

    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        user_id: Uuid,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, name, email, password, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(exec)
        .await
    }

    pub async fn find_by_email(
        exec: impl PgExecutor<'_>,
        email: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, name, email, password, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(exec)
        .await
    }

    /// 插入用户，password 必须已经完成哈希
    pub async fn insert(
        exec: impl PgExecutor<'_>,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserEntity, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(exec)
        .await
    }

    /// 部分更新用户，用户不存在时返回 None
    pub async fn update(
        exec: impl PgExecutor<'_>,
        user_id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, email, password, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(email)
        .fetch_optional(exec)
        .await
    }

    pub async fn delete(
        exec: impl PgExecutor<'_>,
        user_id: Uuid,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, name, email, password, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .fetch_optional(exec)
        .await
    }

    pub async fn find_profile(
        exec: impl PgExecutor<'_>,
        user_id: Uuid,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(
            r#"
            SELECT user_id, metadata, created_at, updated_at
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(exec)
        .await
    }

    pub async fn insert_profile(
        exec: impl PgExecutor<'_>,
        user_id: Uuid,
        metadata: &serde_json::Value,
    ) -> Result<ProfileEntity, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(
            r#"
            INSERT INTO user_profiles (user_id, metadata)
            VALUES ($1, $2)
            RETURNING user_id, metadata, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(metadata)
        .fetch_one(exec)
        .await
    }

    /// 整体替换资料文档，资料不存在时返回 None
    pub async fn update_profile(
        exec: impl PgExecutor<'_>,
        user_id: Uuid,
        metadata: &serde_json::Value,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(
            r#"
            UPDATE user_profiles
            SET metadata = $2, updated_at = now()
            WHERE user_id = $1
            RETURNING user_id, metadata, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(metadata)
        .fetch_optional(exec)
        .await
    }
}
