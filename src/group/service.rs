// 群组生命周期管理
// 所有涉及多行写入的操作都在单个事务内执行：任一步失败整体回滚，
// 外部观察不到中间状态。名称冲突和重复成员的最终裁决来自
// 存储层约束，经映射表翻译成领域错误。

use sqlx::PgPool;
use uuid::Uuid;

use crate::database::entities::group::{GroupEntity, GroupMemberRow, MemberRole, MembershipEntity};
use crate::database::entities::user::UserEntity;
use crate::database::repositories::group::GroupRepository;
use crate::database::repositories::membership::{MembershipRepository, NewMembership};
use crate::database::repositories::user::UserRepository;
use crate::error::AppError;

/// 群组详情：群组行 + 创建者 + 成员列表
#[derive(Debug)]
pub struct GroupWithMembers {
    pub group: GroupEntity,
    pub creator: UserEntity,
    pub members: Vec<GroupMemberRow>,
}

/// 群组生命周期管理器
pub struct GroupService {
    pool: PgPool,
}

impl GroupService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 创建群组：群组行和群主成员记录作为一个原子单元写入
    ///
    /// 创建者不存在时返回 NotFound；名称已被占用时返回 Conflict，
    /// 并发抢占同名的竞争由唯一约束裁决。
    pub async fn create(
        &self,
        creator_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<GroupEntity, AppError> {
        let mut tx = self.pool.begin().await?;

        if !UserRepository::exists(&mut *tx, creator_id).await? {
            return Err(AppError::NotFound(format!(
                "User with ID {} not found",
                creator_id
            )));
        }

        let group = GroupRepository::insert(&mut *tx, name, description, creator_id).await?;

        MembershipRepository::insert(
            &mut *tx,
            &NewMembership {
                group_id: group.id,
                user_id: creator_id,
                role: MemberRole::Owner,
            },
        )
        .await?;

        tx.commit().await?;

        Ok(group)
    }

    /// 获取群组详情
    pub async fn find(&self, group_id: Uuid) -> Result<GroupWithMembers, AppError> {
        let group = GroupRepository::find_by_id(&self.pool, group_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Group with ID {} not found", group_id))
            })?;

        let creator = UserRepository::find_by_id(&self.pool, group.creator_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User with ID {} not found", group.creator_id))
            })?;

        let members = MembershipRepository::list_members(&self.pool, group_id).await?;

        Ok(GroupWithMembers {
            group,
            creator,
            members,
        })
    }

    /// 更新群组名称/描述；至少一个字段由上层保证
    pub async fn update(
        &self,
        group_id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<GroupEntity, AppError> {
        GroupRepository::update(&self.pool, group_id, name, description)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group with ID {} not found", group_id)))
    }

    /// 删除群组，成员记录级联删除
    ///
    /// 这里不做权限检查；调用方必须先通过所有权判定引擎授权。
    pub async fn delete(&self, group_id: Uuid) -> Result<GroupEntity, AppError> {
        GroupRepository::delete(&self.pool, group_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group with ID {} not found", group_id)))
    }

    /// 以普通成员身份加入群组
    pub async fn join(&self, group_id: Uuid, user_id: Uuid) -> Result<MembershipEntity, AppError> {
        let mut tx = self.pool.begin().await?;

        if !GroupRepository::exists(&mut *tx, group_id).await? {
            return Err(AppError::NotFound(format!(
                "Group with ID {} not found",
                group_id
            )));
        }

        if !UserRepository::exists(&mut *tx, user_id).await? {
            return Err(AppError::NotFound(format!(
                "User with ID {} not found",
                user_id
            )));
        }

        if MembershipRepository::find(&mut *tx, group_id, user_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "User {} is already a member of this group",
                user_id
            )));
        }

        let membership = MembershipRepository::insert(
            &mut *tx,
            &NewMembership {
                group_id,
                user_id,
                role: MemberRole::Member,
            },
        )
        .await?;

        tx.commit().await?;

        Ok(membership)
    }

    /// 退出群组
    ///
    /// 群主不能退出：要么删除群组，要么放弃操作。
    pub async fn leave(&self, group_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let membership = MembershipRepository::find(&mut *tx, group_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User {} is not a member of this group", user_id))
            })?;

        if membership.role == MemberRole::Owner {
            return Err(AppError::Forbidden(
                "Group owner cannot leave. Transfer ownership or delete the group".to_string(),
            ));
        }

        MembershipRepository::delete(&mut *tx, group_id, user_id).await?;

        tx.commit().await?;

        Ok(())
    }

    /// 将成员移出群组，由群主调用；群主自身不可被移除
    pub async fn remove_member(
        &self,
        group_id: Uuid,
        user_id_to_remove: Uuid,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let membership = MembershipRepository::find(&mut *tx, group_id, user_id_to_remove)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "User {} is not a member of this group",
                    user_id_to_remove
                ))
            })?;

        if membership.role == MemberRole::Owner {
            return Err(AppError::Forbidden(
                "Cannot remove the group owner".to_string(),
            ));
        }

        MembershipRepository::delete(&mut *tx, group_id, user_id_to_remove).await?;

        tx.commit().await?;

        Ok(())
    }
}
