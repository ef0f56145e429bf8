use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{
    AppState,
    middleware::{auth_middleware, log_errors},
    routes,
};

/// 组装完整路由
///
/// 公开路由只有注册、登录和健康检查；其余全部挂在认证中间件之后。
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(routes::health::ping))
        .route("/users/register", post(routes::user::register))
        .route("/users/login", post(routes::user::login));

    let protected_routes = Router::new()
        // 用户路由
        .route(
            "/users/me",
            axum::routing::patch(routes::user::update_me).delete(routes::user::delete_me),
        )
        .route(
            "/users/me/profile",
            post(routes::user::create_profile).patch(routes::user::update_profile),
        )
        .route("/users/{user_id}", get(routes::user::get_user))
        // 帖子路由
        .route("/posts", post(routes::post::create_post))
        .route(
            "/posts/{post_id}",
            get(routes::post::get_post)
                .patch(routes::post::update_post)
                .delete(routes::post::delete_post),
        )
        // 评论路由
        .route("/comments", post(routes::comment::create_comment))
        .route(
            "/comments/{comment_id}",
            get(routes::comment::get_comment)
                .patch(routes::comment::update_comment)
                .delete(routes::comment::delete_comment),
        )
        // 群组路由
        .route("/groups", post(routes::group::create_group))
        .route(
            "/groups/{group_id}",
            get(routes::group::get_group)
                .patch(routes::group::update_group)
                .delete(routes::group::delete_group),
        )
        .route("/groups/{group_id}/join", post(routes::group::join_group))
        .route("/groups/{group_id}/leave", delete(routes::group::leave_group))
        .route(
            "/groups/{group_id}/members/{user_id}",
            delete(routes::group::remove_member),
        )
        // 应用认证中间件
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest(
            &state.config.api_base_uri.clone(),
            Router::new().merge(public_routes).merge(protected_routes),
        )
        .layer(axum::middleware::from_fn(log_errors))
        .with_state(state)
}
