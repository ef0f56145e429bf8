// 约束错误映射
// 将存储层的约束冲突（错误码 + 约束名）翻译为领域错误

use crate::error::AppError;

/// PostgreSQL 错误码
pub const UNIQUE_VIOLATION: &str = "23505";
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

enum Violation {
    Conflict(&'static str),
    NotFound(&'static str),
}

struct Mapping {
    code: &'static str,
    constraint: &'static str,
    violation: Violation,
}

/// 映射表：(错误码, 约束名) -> 领域错误
///
/// 表中不存在的组合原样向上传播，由调用方作为意外错误处理。
const MAPPINGS: &[Mapping] = &[
    Mapping {
        code: UNIQUE_VIOLATION,
        constraint: "groups_name_key",
        violation: Violation::Conflict("Group name already exists"),
    },
    Mapping {
        code: UNIQUE_VIOLATION,
        constraint: "group_members_pkey",
        violation: Violation::Conflict("User is already a member of this group"),
    },
    Mapping {
        code: UNIQUE_VIOLATION,
        constraint: "idx_one_owner_per_group",
        violation: Violation::Conflict("Group already has an owner"),
    },
    Mapping {
        code: UNIQUE_VIOLATION,
        constraint: "users_email_key",
        violation: Violation::Conflict("Email already in use"),
    },
    Mapping {
        code: FOREIGN_KEY_VIOLATION,
        constraint: "group_members_group_id_fkey",
        violation: Violation::NotFound("Group not found"),
    },
    Mapping {
        code: FOREIGN_KEY_VIOLATION,
        constraint: "group_members_user_id_fkey",
        violation: Violation::NotFound("User not found"),
    },
    Mapping {
        code: FOREIGN_KEY_VIOLATION,
        constraint: "posts_author_id_fkey",
        violation: Violation::NotFound("User not found"),
    },
    Mapping {
        code: FOREIGN_KEY_VIOLATION,
        constraint: "comments_author_id_fkey",
        violation: Violation::NotFound("User not found"),
    },
    Mapping {
        code: FOREIGN_KEY_VIOLATION,
        constraint: "comments_post_id_fkey",
        violation: Violation::NotFound("Post not found"),
    },
    Mapping {
        code: FOREIGN_KEY_VIOLATION,
        constraint: "user_profiles_user_id_fkey",
        violation: Violation::NotFound("User not found"),
    },
];

/// 查询映射表，未命中返回 None
pub fn lookup(code: &str, constraint: Option<&str>) -> Option<AppError> {
    let constraint = constraint?;

    MAPPINGS
        .iter()
        .find(|m| m.code == code && m.constraint == constraint)
        .map(|m| match m.violation {
            Violation::Conflict(msg) => AppError::Conflict(msg.to_string()),
            Violation::NotFound(msg) => AppError::NotFound(msg.to_string()),
        })
}

/// sqlx 错误适配：约束冲突走映射表，其余原样包装为 Database
pub fn translate(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(code) = db_err.code() {
            if let Some(mapped) = lookup(code.as_ref(), db_err.constraint()) {
                return mapped;
            }
        }
    }

    AppError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_group_name_maps_to_conflict() {
        match lookup(UNIQUE_VIOLATION, Some("groups_name_key")) {
            Some(AppError::Conflict(msg)) => assert_eq!(msg, "Group name already exists"),
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn duplicate_membership_maps_to_conflict() {
        match lookup(UNIQUE_VIOLATION, Some("group_members_pkey")) {
            Some(AppError::Conflict(msg)) => {
                assert_eq!(msg, "User is already a member of this group")
            }
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn second_owner_maps_to_conflict() {
        assert!(matches!(
            lookup(UNIQUE_VIOLATION, Some("idx_one_owner_per_group")),
            Some(AppError::Conflict(_))
        ));
    }

    #[test]
    fn membership_foreign_keys_map_to_not_found() {
        assert!(matches!(
            lookup(FOREIGN_KEY_VIOLATION, Some("group_members_group_id_fkey")),
            Some(AppError::NotFound(_))
        ));
        assert!(matches!(
            lookup(FOREIGN_KEY_VIOLATION, Some("group_members_user_id_fkey")),
            Some(AppError::NotFound(_))
        ));
    }

    #[test]
    fn unmapped_pairs_are_not_translated() {
        assert!(lookup(UNIQUE_VIOLATION, Some("some_other_constraint")).is_none());
        assert!(lookup("23514", Some("groups_name_key")).is_none());
        assert!(lookup(UNIQUE_VIOLATION, None).is_none());
    }

    #[test]
    fn non_database_errors_pass_through_unchanged() {
        assert!(matches!(
            translate(sqlx::Error::RowNotFound),
            AppError::Database(sqlx::Error::RowNotFound)
        ));
    }
}
