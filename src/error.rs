use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use crate::utils::{error_codes, error_to_api_response};

/// 应用错误分类
///
/// `Database` 保存未被约束映射表识别的底层错误，
/// 统一作为服务器内部错误返回，不会被静默吞掉。
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Conflict(String),
    Forbidden(String),
    Unauthorized(String),
    Validation(String),
    Internal(String),
    Database(sqlx::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Forbidden(msg)
            | AppError::Unauthorized(msg)
            | AppError::Validation(msg)
            | AppError::Internal(msg) => write!(f, "{}", msg),
            AppError::Database(err) => write!(f, "database error: {}", err),
        }
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        crate::database::constraint::translate(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, msg)
            }
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, error_codes::AUTH_FAILED, msg)
            }
            AppError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, error_codes::PERMISSION_DENIED, msg)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, error_codes::CONFLICT, msg),
            AppError::Internal(msg) => {
                tracing::error!("内部错误: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Database(err) => {
                tracing::error!("未映射的数据库错误: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, error_to_api_response::<()>(code, message)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_map_to_expected_status() {
        let cases = [
            (
                AppError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Unauthorized("no".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (AppError::Forbidden("deny".into()), StatusCode::FORBIDDEN),
            (AppError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (AppError::Conflict("dup".into()), StatusCode::CONFLICT),
            (
                AppError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn display_shows_domain_message() {
        let err = AppError::Forbidden("Cannot remove the group owner".into());
        assert_eq!(err.to_string(), "Cannot remove the group owner");
    }
}
