use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::AppState;
use crate::authorization::{OwnershipEngine, ResourceKind};
use crate::database::repositories::comment::CommentRepository;
use crate::database::repositories::post::PostRepository;
use crate::database::repositories::user::UserRepository;
use crate::error::AppError;
use crate::routes::post::model::AuthorInfo;
use crate::utils::{Claims, success_to_api_response};

use super::model::{CommentDetail, CommentInfo, CreateCommentRequest, UpdateCommentRequest};

/// 发表评论
#[axum::debug_handler]
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if !UserRepository::exists(&state.pool, claims.sub).await? {
        return Err(AppError::NotFound(format!(
            "User with ID {} not found",
            claims.sub
        )));
    }

    if !PostRepository::exists(&state.pool, req.post_id).await? {
        return Err(AppError::NotFound(format!(
            "Post with ID {} not found",
            req.post_id
        )));
    }

    let comment =
        CommentRepository::insert(&state.pool, claims.sub, req.post_id, &req.content).await?;

    tracing::info!("用户 {} 评论了帖子 {}", claims.sub, req.post_id);

    Ok((
        StatusCode::CREATED,
        success_to_api_response(CommentInfo::from(comment)),
    ))
}

/// 获取评论详情
#[axum::debug_handler]
pub async fn get_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let comment = CommentRepository::find_by_id(&state.pool, comment_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Comment with ID {} not found", comment_id))
        })?;

    let author = UserRepository::find_by_id(&state.pool, comment.author_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("User with ID {} not found", comment.author_id))
        })?;

    Ok((
        StatusCode::OK,
        success_to_api_response(CommentDetail {
            id: comment.id,
            content: comment.content,
            post_id: comment.post_id,
            author: AuthorInfo {
                id: author.id,
                name: author.name,
            },
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }),
    ))
}

/// 更新评论，仅作者可操作
#[axum::debug_handler]
pub async fn update_comment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(comment_id): Path<Uuid>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    OwnershipEngine::new(state.pool.clone())
        .authorize(claims.sub, ResourceKind::Comment, comment_id)
        .await?;

    let comment = CommentRepository::update(&state.pool, comment_id, &req.content)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Comment with ID {} not found", comment_id))
        })?;

    Ok((
        StatusCode::OK,
        success_to_api_response(CommentInfo::from(comment)),
    ))
}

/// 删除评论，仅作者可操作
#[axum::debug_handler]
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(comment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    OwnershipEngine::new(state.pool.clone())
        .authorize(claims.sub, ResourceKind::Comment, comment_id)
        .await?;

    let comment = CommentRepository::delete(&state.pool, comment_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Comment with ID {} not found", comment_id))
        })?;

    tracing::info!("用户 {} 删除评论 {}", claims.sub, comment.id);

    Ok((
        StatusCode::OK,
        success_to_api_response(CommentInfo::from(comment)),
    ))
}
