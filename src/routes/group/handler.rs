use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::AppState;
use crate::authorization::{OwnershipEngine, ResourceKind};
use crate::error::AppError;
use crate::group::GroupService;
use crate::utils::{Claims, success_to_api_response};

use super::model::{
    CreateGroupRequest, GroupDetail, GroupInfo, MemberOperationResponse, MembershipInfo,
    UpdateGroupRequest,
};

/// 创建群组，创建者自动成为群主
#[axum::debug_handler]
pub async fn create_group(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    tracing::debug!("用户 {} 正在创建群组: {}", claims.sub, req.name);

    let service = GroupService::new(state.pool.clone());
    let group = service
        .create(claims.sub, &req.name, req.description.as_deref())
        .await?;

    tracing::info!("用户 {} 成功创建群组 {}: {}", claims.sub, group.id, group.name);

    Ok((
        StatusCode::CREATED,
        success_to_api_response(GroupInfo::from(group)),
    ))
}

/// 获取群组详情
#[axum::debug_handler]
pub async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let service = GroupService::new(state.pool.clone());
    let detail = service.find(group_id).await?;

    Ok((
        StatusCode::OK,
        success_to_api_response(GroupDetail::from(detail)),
    ))
}

/// 更新群组名称/描述，仅群主可操作
#[axum::debug_handler]
pub async fn update_group(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<Uuid>,
    Json(req): Json<UpdateGroupRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    OwnershipEngine::new(state.pool.clone())
        .authorize(claims.sub, ResourceKind::Group, group_id)
        .await?;

    let service = GroupService::new(state.pool.clone());
    let group = service
        .update(group_id, req.name.as_deref(), req.description.as_deref())
        .await?;

    tracing::info!("用户 {} 更新了群组 {}", claims.sub, group_id);

    Ok((
        StatusCode::OK,
        success_to_api_response(GroupInfo::from(group)),
    ))
}

/// 删除群组，仅群主可操作
#[axum::debug_handler]
pub async fn delete_group(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    OwnershipEngine::new(state.pool.clone())
        .authorize(claims.sub, ResourceKind::Group, group_id)
        .await?;

    let service = GroupService::new(state.pool.clone());
    let group = service.delete(group_id).await?;

    tracing::info!("用户 {} 删除了群组 {}: {}", claims.sub, group.id, group.name);

    Ok((
        StatusCode::OK,
        success_to_api_response(GroupInfo::from(group)),
    ))
}

/// 加入群组
#[axum::debug_handler]
pub async fn join_group(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!("用户 {} 正在尝试加入群组 {}", claims.sub, group_id);

    let service = GroupService::new(state.pool.clone());
    let membership = service.join(group_id, claims.sub).await?;

    tracing::info!("用户 {} 成功加入群组 {}", claims.sub, group_id);

    Ok((
        StatusCode::CREATED,
        success_to_api_response(MembershipInfo::from(membership)),
    ))
}

/// 退出群组，群主不可退出
#[axum::debug_handler]
pub async fn leave_group(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!("用户 {} 正在尝试离开群组 {}", claims.sub, group_id);

    let service = GroupService::new(state.pool.clone());
    service.leave(group_id, claims.sub).await?;

    tracing::info!("用户 {} 成功离开群组 {}", claims.sub, group_id);

    Ok((
        StatusCode::OK,
        success_to_api_response(MemberOperationResponse {
            message: format!("Member {} has successfully left the group", claims.sub),
        }),
    ))
}

/// 将成员移出群组，仅群主可操作
#[axum::debug_handler]
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((group_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(
        "用户 {} 尝试从群组 {} 中移除用户 {}",
        claims.sub,
        group_id,
        user_id
    );

    OwnershipEngine::new(state.pool.clone())
        .authorize(claims.sub, ResourceKind::Group, group_id)
        .await?;

    let service = GroupService::new(state.pool.clone());
    service.remove_member(group_id, user_id).await?;

    tracing::info!(
        "用户 {} 成功从群组 {} 中移除成员 {}",
        claims.sub,
        group_id,
        user_id
    );

    Ok((
        StatusCode::OK,
        success_to_api_response(MemberOperationResponse {
            message: format!("Member {} has been successfully removed", user_id),
        }),
    ))
}
