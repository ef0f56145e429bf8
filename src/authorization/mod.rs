// 资源所有权判定
// 给定操作者和 (资源类型, 资源ID)，从存储解析当前所有者并决定放行或拒绝。
// 判定读取不在写事务内进行，属于前置检查；唯一群主的最终保证
// 仍然是存储层约束。

use sqlx::PgPool;
use uuid::Uuid;

use crate::database::entities::group::{MemberRole, MembershipEntity};
use crate::database::repositories::comment::CommentRepository;
use crate::database::repositories::membership::MembershipRepository;
use crate::database::repositories::post::PostRepository;
use crate::error::AppError;

/// 可判定的资源类型，封闭集合
///
/// 新增资源类型时在这里加一个变体，match 的穷尽性检查
/// 会强制补全对应分支。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Post,
    Comment,
    Group,
}

/// 所有权判定引擎
pub struct OwnershipEngine {
    pool: PgPool,
}

impl OwnershipEngine {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 判定操作者能否修改指定资源
    ///
    /// 帖子和评论按作者判定；群组按当前群主成员记录判定。
    /// 资源不存在时在这一层按 Forbidden 报告，避免未授权的
    /// 探测区分"不存在"和"存在但不属于你"。
    pub async fn authorize(
        &self,
        principal_id: Uuid,
        kind: ResourceKind,
        resource_id: Uuid,
    ) -> Result<(), AppError> {
        match kind {
            ResourceKind::Post => {
                let author_id = PostRepository::find_author_id(&self.pool, resource_id).await?;
                check_author_ownership(
                    author_id,
                    principal_id,
                    "Post not found",
                    "You can only modify your own posts",
                )
            }
            ResourceKind::Comment => {
                let author_id = CommentRepository::find_author_id(&self.pool, resource_id).await?;
                check_author_ownership(
                    author_id,
                    principal_id,
                    "Comment not found",
                    "You can only modify your own comments",
                )
            }
            ResourceKind::Group => {
                let membership =
                    MembershipRepository::find(&self.pool, resource_id, principal_id).await?;
                check_group_ownership(membership)
            }
        }
    }
}

/// 作者型资源的判定
fn check_author_ownership(
    author_id: Option<Uuid>,
    principal_id: Uuid,
    missing_msg: &str,
    mismatch_msg: &str,
) -> Result<(), AppError> {
    match author_id {
        None => Err(AppError::Forbidden(missing_msg.to_string())),
        Some(author_id) if author_id != principal_id => {
            Err(AppError::Forbidden(mismatch_msg.to_string()))
        }
        Some(_) => Ok(()),
    }
}

/// 群主判定：无成员记录和非群主分开报告
fn check_group_ownership(membership: Option<MembershipEntity>) -> Result<(), AppError> {
    match membership {
        None => Err(AppError::Forbidden(
            "You are not a member of this group".to_string(),
        )),
        Some(m) if m.role != MemberRole::Owner => Err(AppError::Forbidden(
            "Only the group owner can perform this action".to_string(),
        )),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn membership(role: MemberRole) -> MembershipEntity {
        MembershipEntity {
            group_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role,
            joined_at: Utc::now(),
        }
    }

    #[test]
    fn author_match_is_allowed() {
        let principal = Uuid::new_v4();
        assert!(check_author_ownership(Some(principal), principal, "gone", "mine").is_ok());
    }

    #[test]
    fn author_mismatch_is_forbidden_with_mismatch_reason() {
        let result = check_author_ownership(
            Some(Uuid::new_v4()),
            Uuid::new_v4(),
            "Post not found",
            "You can only modify your own posts",
        );
        match result {
            Err(AppError::Forbidden(msg)) => {
                assert_eq!(msg, "You can only modify your own posts")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn missing_resource_is_forbidden_not_not_found() {
        let result =
            check_author_ownership(None, Uuid::new_v4(), "Post not found", "your own posts");
        assert!(matches!(result, Err(AppError::Forbidden(msg)) if msg == "Post not found"));
    }

    #[test]
    fn group_owner_is_allowed() {
        assert!(check_group_ownership(Some(membership(MemberRole::Owner))).is_ok());
    }

    #[test]
    fn group_member_is_denied_with_owner_reason() {
        let result = check_group_ownership(Some(membership(MemberRole::Member)));
        assert!(matches!(
            result,
            Err(AppError::Forbidden(msg)) if msg == "Only the group owner can perform this action"
        ));
    }

    #[test]
    fn non_member_is_denied_with_membership_reason() {
        let result = check_group_ownership(None);
        assert!(matches!(
            result,
            Err(AppError::Forbidden(msg)) if msg == "You are not a member of this group"
        ));
    }
}
