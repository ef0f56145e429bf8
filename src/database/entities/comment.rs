use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// 评论实体
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentEntity {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 帖子详情里的评论行，携带作者昵称
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentWithAuthorRow {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}
