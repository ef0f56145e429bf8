// 群组实体
// 定义群组和群组成员相关的数据库实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// 群组实体，对应数据库中的群组表
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupEntity {
    /// 群组ID
    pub id: Uuid,
    /// 群组名称，全局唯一
    pub name: String,
    /// 群组描述
    pub description: Option<String>,
    /// 创建者ID
    pub creator_id: Uuid,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
}

/// 成员角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum MemberRole {
    Member,
    Owner,
}

/// 群组成员实体，(group_id, user_id) 为复合主键
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MembershipEntity {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

/// 成员列表行，携带用户昵称
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GroupMemberRow {
    pub user_id: Uuid,
    pub name: String,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}
