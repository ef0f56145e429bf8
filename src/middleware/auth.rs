use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{AppState, error::AppError, utils::verify_token};

/// 认证中间件
///
/// 校验 Bearer 令牌并把解析出的 Claims 注入请求扩展，
/// 后续处理器通过 Extension(claims) 拿到已验证的操作者ID。
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        return Err(AppError::Unauthorized("Authentication required".to_string()));
    };

    let claims = verify_token(bearer.token(), &state.config).map_err(|err| {
        tracing::debug!("令牌校验失败: {}", err);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
