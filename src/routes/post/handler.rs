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
use crate::utils::{Claims, success_to_api_response};

use super::model::{
    AuthorInfo, CreatePostRequest, PostCommentInfo, PostDetail, PostInfo, UpdatePostRequest,
};

/// 发布帖子
#[axum::debug_handler]
pub async fn create_post(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if !UserRepository::exists(&state.pool, claims.sub).await? {
        return Err(AppError::NotFound(format!(
            "User with ID {} not found",
            claims.sub
        )));
    }

    let post = PostRepository::insert(&state.pool, claims.sub, &req.title, &req.content).await?;

    tracing::info!("用户 {} 发布帖子 {}", claims.sub, post.id);

    Ok((
        StatusCode::CREATED,
        success_to_api_response(PostInfo::from(post)),
    ))
}

/// 获取帖子详情（含作者和评论）
#[axum::debug_handler]
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let post = PostRepository::find_by_id(&state.pool, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post with ID {} not found", post_id)))?;

    let author = UserRepository::find_by_id(&state.pool, post.author_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with ID {} not found", post.author_id)))?;

    let comments = CommentRepository::list_for_post(&state.pool, post_id).await?;

    Ok((
        StatusCode::OK,
        success_to_api_response(PostDetail {
            id: post.id,
            title: post.title,
            content: post.content,
            author: AuthorInfo {
                id: author.id,
                name: author.name,
            },
            comments: comments.into_iter().map(PostCommentInfo::from).collect(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }),
    ))
}

/// 更新帖子，仅作者可操作
#[axum::debug_handler]
pub async fn update_post(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(post_id): Path<Uuid>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    OwnershipEngine::new(state.pool.clone())
        .authorize(claims.sub, ResourceKind::Post, post_id)
        .await?;

    let post = PostRepository::update(
        &state.pool,
        post_id,
        req.title.as_deref(),
        req.content.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Post with ID {} not found", post_id)))?;

    Ok((
        StatusCode::OK,
        success_to_api_response(PostInfo::from(post)),
    ))
}

/// 删除帖子，仅作者可操作
#[axum::debug_handler]
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    OwnershipEngine::new(state.pool.clone())
        .authorize(claims.sub, ResourceKind::Post, post_id)
        .await?;

    let post = PostRepository::delete(&state.pool, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post with ID {} not found", post_id)))?;

    tracing::info!("用户 {} 删除帖子 {}", claims.sub, post.id);

    Ok((
        StatusCode::OK,
        success_to_api_response(PostInfo::from(post)),
    ))
}
