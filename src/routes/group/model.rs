use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::entities::group::{GroupEntity, GroupMemberRow, MemberRole, MembershipEntity};
use crate::error::AppError;
use crate::group::service::GroupWithMembers;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 25;
const DESCRIPTION_MAX_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
}

impl CreateGroupRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_name(&self.name)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateGroupRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_none() && self.description.is_none() {
            return Err(AppError::Validation(
                "At least one property must be provided for update: name, description".to_string(),
            ));
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    let len = name.chars().count();
    if len < NAME_MIN_CHARS || len > NAME_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "name must be between {} and {} characters",
            NAME_MIN_CHARS, NAME_MAX_CHARS
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), AppError> {
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "description must be at most {} characters",
            DESCRIPTION_MAX_CHARS
        )));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct GroupInfo {
    pub group_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GroupEntity> for GroupInfo {
    fn from(group: GroupEntity) -> Self {
        Self {
            group_id: group.id,
            name: group.name,
            description: group.description,
            creator_id: group.creator_id,
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GroupCreatorInfo {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct GroupMemberInfo {
    pub user_id: Uuid,
    pub name: String,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl From<GroupMemberRow> for GroupMemberInfo {
    fn from(row: GroupMemberRow) -> Self {
        Self {
            user_id: row.user_id,
            name: row.name,
            role: row.role,
            joined_at: row.joined_at,
        }
    }
}

/// 群组详情，包含创建者和全部成员
#[derive(Debug, Serialize)]
pub struct GroupDetail {
    pub group_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub creator: GroupCreatorInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub members: Vec<GroupMemberInfo>,
}

impl From<GroupWithMembers> for GroupDetail {
    fn from(detail: GroupWithMembers) -> Self {
        Self {
            group_id: detail.group.id,
            name: detail.group.name,
            description: detail.group.description,
            creator: GroupCreatorInfo {
                id: detail.creator.id,
                name: detail.creator.name,
            },
            created_at: detail.group.created_at,
            updated_at: detail.group.updated_at,
            members: detail.members.into_iter().map(GroupMemberInfo::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MembershipInfo {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl From<MembershipEntity> for MembershipInfo {
    fn from(membership: MembershipEntity) -> Self {
        Self {
            group_id: membership.group_id,
            user_id: membership.user_id,
            role: membership.role,
            joined_at: membership.joined_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberOperationResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_rejects_short_and_long_names() {
        let short = CreateGroupRequest {
            name: "a".into(),
            description: None,
        };
        assert!(matches!(short.validate(), Err(AppError::Validation(_))));

        let long = CreateGroupRequest {
            name: "x".repeat(26),
            description: None,
        };
        assert!(matches!(long.validate(), Err(AppError::Validation(_))));

        let ok = CreateGroupRequest {
            name: "Rust".into(),
            description: Some("systems programming".into()),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn create_request_rejects_oversized_description() {
        let req = CreateGroupRequest {
            name: "Rust".into(),
            description: Some("d".repeat(501)),
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn update_request_requires_at_least_one_field() {
        let empty = UpdateGroupRequest {
            name: None,
            description: None,
        };
        assert!(matches!(empty.validate(), Err(AppError::Validation(_))));

        let name_only = UpdateGroupRequest {
            name: Some("Rustaceans".into()),
            description: None,
        };
        assert!(name_only.validate().is_ok());
    }
}
