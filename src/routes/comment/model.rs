use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::entities::comment::CommentEntity;
use crate::error::AppError;
use crate::routes::post::model::AuthorInfo;

const CONTENT_MAX_CHARS: usize = 2_000;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub post_id: Uuid,
    pub content: String,
}

impl CreateCommentRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_content(&self.content)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

impl UpdateCommentRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_content(&self.content)
    }
}

fn validate_content(content: &str) -> Result<(), AppError> {
    let len = content.chars().count();
    if len == 0 || len > CONTENT_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "content must be between 1 and {} characters",
            CONTENT_MAX_CHARS
        )));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CommentInfo {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CommentEntity> for CommentInfo {
    fn from(comment: CommentEntity) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            author_id: comment.author_id,
            post_id: comment.post_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// 评论详情，携带作者摘要
#[derive(Debug, Serialize)]
pub struct CommentDetail {
    pub id: Uuid,
    pub content: String,
    pub post_id: Uuid,
    pub author: AuthorInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
