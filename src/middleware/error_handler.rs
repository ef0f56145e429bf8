use axum::{
    body::{Body, to_bytes},
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::error;

// 记录日志时最多读取的响应体字节数
const LOG_BODY_LIMIT: usize = 4096;

/// 记录所有 5xx 响应的状态和响应体
pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let response = next.run(req).await;

    if response.status().is_server_error() {
        let (mut parts, body) = response.into_parts();
        let bytes = match to_bytes(body, LOG_BODY_LIMIT).await {
            Ok(b) => b,
            Err(e) => {
                error!("读取错误响应体失败: {}", e);
                return Response::from_parts(parts, Body::empty());
            }
        };
        let body_str = String::from_utf8_lossy(&bytes);

        error!(
            "服务器错误 - Status: {}, Body: {}",
            parts.status, body_str
        );

        // 消费过响应体之后需要重建响应
        parts.headers.remove(axum::http::header::CONTENT_LENGTH);
        Response::from_parts(parts, Body::from(bytes))
    } else {
        response
    }
}
