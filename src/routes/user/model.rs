use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::entities::user::{ProfileEntity, UserEntity};
use crate::error::AppError;

const PASSWORD_MIN_CHARS: usize = 8;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
        if !self.email.contains('@') {
            return Err(AppError::Validation(
                "email must be a valid email address".to_string(),
            ));
        }
        if self.password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(AppError::Validation(format!(
                "password must be at least {} characters",
                PASSWORD_MIN_CHARS
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_none() && self.email.is_none() {
            return Err(AppError::Validation(
                "At least one property must be provided for update: name, email".to_string(),
            ));
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("name must not be empty".to_string()));
            }
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(AppError::Validation(
                    "email must be a valid email address".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// 资料请求体，metadata 整体替换
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub metadata: serde_json::Value,
}

impl ProfileRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.metadata.is_null() {
            return Err(AppError::Validation("metadata cannot be null".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for UserInfo {
    fn from(user: UserEntity) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileInfo {
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileEntity> for ProfileInfo {
    fn from(profile: ProfileEntity) -> Self {
        Self {
            metadata: profile.metadata,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// 用户详情，附带资料（如果有）
#[derive(Debug, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: UserInfo,
    pub profile: Option<ProfileInfo>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub token: String,
    pub expires_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_rejects_bad_input() {
        let bad_email = RegisterRequest {
            name: "alice".into(),
            email: "not-an-email".into(),
            password: "longenough".into(),
        };
        assert!(matches!(bad_email.validate(), Err(AppError::Validation(_))));

        let short_password = RegisterRequest {
            name: "alice".into(),
            email: "alice@example.com".into(),
            password: "short".into(),
        };
        assert!(matches!(
            short_password.validate(),
            Err(AppError::Validation(_))
        ));

        let ok = RegisterRequest {
            name: "alice".into(),
            email: "alice@example.com".into(),
            password: "longenough".into(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn profile_request_rejects_null_metadata() {
        let req = ProfileRequest {
            metadata: serde_json::Value::Null,
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));

        let ok = ProfileRequest {
            metadata: serde_json::json!({"bio": "rustacean"}),
        };
        assert!(ok.validate().is_ok());
    }
}
