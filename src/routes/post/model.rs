use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::entities::comment::CommentWithAuthorRow;
use crate::database::entities::post::PostEntity;
use crate::error::AppError;

const TITLE_MAX_CHARS: usize = 120;
const CONTENT_MAX_CHARS: usize = 10_000;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_title(&self.title)?;
        validate_content(&self.content)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdatePostRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.is_none() && self.content.is_none() {
            return Err(AppError::Validation(
                "At least one property must be provided for update: title, content".to_string(),
            ));
        }
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), AppError> {
    let len = title.chars().count();
    if len == 0 || len > TITLE_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "title must be between 1 and {} characters",
            TITLE_MAX_CHARS
        )));
    }
    Ok(())
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

/// 作者摘要，嵌在帖子/评论详情里
#[derive(Debug, Serialize)]
pub struct AuthorInfo {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PostInfo {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostEntity> for PostInfo {
    fn from(post: PostEntity) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostCommentInfo {
    pub id: Uuid,
    pub content: String,
    pub author: AuthorInfo,
    pub created_at: DateTime<Utc>,
}

impl From<CommentWithAuthorRow> for PostCommentInfo {
    fn from(row: CommentWithAuthorRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            author: AuthorInfo {
                id: row.author_id,
                name: row.author_name,
            },
            created_at: row.created_at,
        }
    }
}

/// 帖子详情，包含作者和全部评论
#[derive(Debug, Serialize)]
pub struct PostDetail {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: AuthorInfo,
    pub comments: Vec<PostCommentInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
