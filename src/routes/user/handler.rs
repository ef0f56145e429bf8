use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::AppState;
use crate::database::repositories::user::UserRepository;
use crate::error::AppError;
use crate::utils::{
    Claims, generate_token, hash_password, success_to_api_response, verify_password,
};

use super::model::{
    AuthResponse, LoginRequest, ProfileInfo, ProfileRequest, RegisterRequest, UpdateUserRequest,
    UserDetail, UserInfo,
};

/// 注册新用户并签发令牌
///
/// 邮箱预检查只是为了尽早返回；并发注册同一邮箱时
/// 由唯一约束裁决，经映射表同样翻译为 Conflict。
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if UserRepository::find_by_email(&state.pool, &req.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Email already in use".to_string()));
    }

    let password_hash = hash_password(&req.password)
        .map_err(|err| AppError::Internal(format!("Failed to hash password: {}", err)))?;

    let user = UserRepository::insert(&state.pool, &req.name, &req.email, &password_hash).await?;

    let (token, expires_at) = generate_token(user.id, &state.config)
        .map_err(|err| AppError::Internal(format!("Failed to generate token: {}", err)))?;

    tracing::info!("新用户注册成功: {}", user.id);

    Ok((
        StatusCode::CREATED,
        success_to_api_response(AuthResponse {
            user: UserInfo::from(user),
            token,
            expires_at,
        }),
    ))
}

/// 登录
///
/// 未注册邮箱和密码错误返回同样的提示，不暴露账号是否存在。
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserRepository::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = verify_password(&req.password, &user.password)
        .map_err(|err| AppError::Internal(format!("Password verification failed: {}", err)))?;

    if !valid {
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let (token, expires_at) = generate_token(user.id, &state.config)
        .map_err(|err| AppError::Internal(format!("Failed to generate token: {}", err)))?;

    tracing::debug!("用户 {} 登录成功", user.id);

    Ok((
        StatusCode::OK,
        success_to_api_response(AuthResponse {
            user: UserInfo::from(user),
            token,
            expires_at,
        }),
    ))
}

/// 获取用户详情（含资料）
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserRepository::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with ID {} not found", user_id)))?;

    let profile = UserRepository::find_profile(&state.pool, user_id).await?;

    Ok((
        StatusCode::OK,
        success_to_api_response(UserDetail {
            user: UserInfo::from(user),
            profile: profile.map(ProfileInfo::from),
        }),
    ))
}

/// 更新当前用户
#[axum::debug_handler]
pub async fn update_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if let Some(email) = &req.email {
        if let Some(existing) = UserRepository::find_by_email(&state.pool, email).await? {
            if existing.id != claims.sub {
                return Err(AppError::Conflict("Email already in use".to_string()));
            }
        }
    }

    let user = UserRepository::update(
        &state.pool,
        claims.sub,
        req.name.as_deref(),
        req.email.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User with ID {} not found", claims.sub)))?;

    Ok((
        StatusCode::OK,
        success_to_api_response(UserInfo::from(user)),
    ))
}

/// 删除当前用户，帖子、评论、成员记录级联删除
#[axum::debug_handler]
pub async fn delete_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserRepository::delete(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with ID {} not found", claims.sub)))?;

    tracing::info!("用户 {} 已注销", user.id);

    Ok((
        StatusCode::OK,
        success_to_api_response(UserInfo::from(user)),
    ))
}

/// 创建当前用户的资料
#[axum::debug_handler]
pub async fn create_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if !UserRepository::exists(&state.pool, claims.sub).await? {
        return Err(AppError::NotFound(format!(
            "User with ID {} not found",
            claims.sub
        )));
    }

    if UserRepository::find_profile(&state.pool, claims.sub)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "This user already has a profile".to_string(),
        ));
    }

    let profile = UserRepository::insert_profile(&state.pool, claims.sub, &req.metadata).await?;

    Ok((
        StatusCode::CREATED,
        success_to_api_response(ProfileInfo::from(profile)),
    ))
}

/// 替换当前用户的资料文档
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let profile = UserRepository::update_profile(&state.pool, claims.sub, &req.metadata)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("This user does not have a profile yet".to_string())
        })?;

    Ok((
        StatusCode::OK,
        success_to_api_response(ProfileInfo::from(profile)),
    ))
}
