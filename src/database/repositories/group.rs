// 群组存储库
// 包含群组行的数据库操作；成员关系见 membership 存储库

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::database::entities::group::GroupEntity;

pub struct GroupRepository;

impl GroupRepository {
    /// 插入群组行
    pub async fn insert(
        exec: impl PgExecutor<'_>,
        name: &str,
        description: Option<&str>,
        creator_id: Uuid,
    ) -> Result<GroupEntity, sqlx::Error> {
        sqlx::query_as::<_, GroupEntity>(
            r#"
            INSERT INTO groups (name, description, creator_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, creator_id, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(creator_id)
        .fetch_one(exec)
        .await
    }

    /// 根据ID查找群组
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        group_id: Uuid,
    ) -> Result<Option<GroupEntity>, sqlx::Error> {
        sqlx::query_as::<_, GroupEntity>(
            r#"
            SELECT id, name, description, creator_id, created_at, updated_at
            FROM groups
            WHERE id = $1
            "#,
        )
        .bind(group_id)
        .fetch_optional(exec)
        .await
    }

    /// 检查群组是否存在
    pub async fn exists(
        exec: impl PgExecutor<'_>,
        group_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM groups WHERE id = $1)")
            .bind(group_id)
            .fetch_one(exec)
            .await
    }

    /// 部分更新群组，未提供的字段保持原值；群组不存在时返回 None
    pub async fn update(
        exec: impl PgExecutor<'_>,
        group_id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<GroupEntity>, sqlx::Error> {
        sqlx::query_as::<_, GroupEntity>(
            r#"
            UPDATE groups
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, description, creator_id, created_at, updated_at
            "#,
        )
        .bind(group_id)
        .bind(name)
        .bind(description)
        .fetch_optional(exec)
        .await
    }

    /// 删除群组，成员记录由外键级联删除；群组不存在时返回 None
    pub async fn delete(
        exec: impl PgExecutor<'_>,
        group_id: Uuid,
    ) -> Result<Option<GroupEntity>, sqlx::Error> {
        sqlx::query_as::<_, GroupEntity>(
            r#"
            DELETE FROM groups
            WHERE id = $1
            RETURNING id, name, description, creator_id, created_at, updated_at
            "#,
        )
        .bind(group_id)
        .fetch_optional(exec)
        .await
    }
}
