// 群组成员存储库
// 只执行存储操作，不做业务判断；约束冲突原样向上传播，
// 由调用方通过约束映射表翻译

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::database::entities::group::{GroupMemberRow, MemberRole, MembershipEntity};

/// 待插入的成员记录
#[derive(Debug, Clone)]
pub struct NewMembership {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
}

/// 群组成员存储库
///
/// 所有方法接受任意执行器，既可以在连接池上单独执行，
/// 也可以挂在生命周期管理器的事务里执行。
pub struct MembershipRepository;

impl MembershipRepository {
    /// 查找指定用户在指定群组中的成员记录
    pub async fn find(
        exec: impl PgExecutor<'_>,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<MembershipEntity>, sqlx::Error> {
        sqlx::query_as::<_, MembershipEntity>(
            r#"
            SELECT group_id, user_id, role, joined_at
            FROM group_members
            WHERE group_id = $1 AND user_id = $2
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_optional(exec)
        .await
    }

    /// 插入成员记录，joined_at 由数据库生成
    pub async fn insert(
        exec: impl PgExecutor<'_>,
        membership: &NewMembership,
    ) -> Result<MembershipEntity, sqlx::Error> {
        sqlx::query_as::<_, MembershipEntity>(
            r#"
            INSERT INTO group_members (group_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING group_id, user_id, role, joined_at
            "#,
        )
        .bind(membership.group_id)
        .bind(membership.user_id)
        .bind(membership.role)
        .fetch_one(exec)
        .await
    }

    /// 删除成员记录，返回是否确实删除了一行
    pub async fn delete(
        exec: impl PgExecutor<'_>,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM group_members
            WHERE group_id = $1 AND user_id = $2
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .execute(exec)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 查找群组当前的群主成员记录
    pub async fn find_owner(
        exec: impl PgExecutor<'_>,
        group_id: Uuid,
    ) -> Result<Option<MembershipEntity>, sqlx::Error> {
        sqlx::query_as::<_, MembershipEntity>(
            r#"
            SELECT group_id, user_id, role, joined_at
            FROM group_members
            WHERE group_id = $1 AND role = 'owner'
            "#,
        )
        .bind(group_id)
        .fetch_optional(exec)
        .await
    }

    /// 统计群组的群主数量
    ///
    /// 仅用于验证和测试；唯一群主的约束由存储层的
    /// 部分唯一索引保证，业务流程不依赖这个计数。
    pub async fn count_owners(
        exec: impl PgExecutor<'_>,
        group_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM group_members
            WHERE group_id = $1 AND role = 'owner'
            "#,
        )
        .bind(group_id)
        .fetch_one(exec)
        .await
    }

    /// 获取群组成员列表（含用户昵称）
    pub async fn list_members(
        exec: impl PgExecutor<'_>,
        group_id: Uuid,
    ) -> Result<Vec<GroupMemberRow>, sqlx::Error> {
        sqlx::query_as::<_, GroupMemberRow>(
            r#"
            SELECT gm.user_id, u.name, gm.role, gm.joined_at
            FROM group_members gm
            JOIN users u ON u.id = gm.user_id
            WHERE gm.group_id = $1
            ORDER BY gm.joined_at
            "#,
        )
        .bind(group_id)
        .fetch_all(exec)
        .await
    }
}
