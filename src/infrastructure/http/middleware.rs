//! HTTP Middleware
//!
//! 代理请求耗时与错误状态日志

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 记录每个代理请求的状态与耗时，4xx 为 warn，5xx 为 error
///
/// 响应体中的错误消息在 ProxyError::into_response() 中记录
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        tracing::error!(method = %method, path = %path, status, elapsed_ms, "Proxy server error");
    } else if response.status().is_client_error() {
        tracing::warn!(method = %method, path = %path, status, elapsed_ms, "Proxy client error");
    } else {
        tracing::debug!(method = %method, path = %path, status, elapsed_ms, "Proxy request served");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::{get, post},
        Router,
    };
    use tower::util::ServiceExt;

    fn create_test_router() -> Router {
        Router::new()
            .route("/api/ping", get(|| async { "ok" }))
            .route("/api/tts", post(|| async { StatusCode::BAD_REQUEST }))
            .route("/api/voices", get(|| async { StatusCode::BAD_GATEWAY }))
            .layer(axum::middleware::from_fn(request_logging_middleware))
    }

    async fn status_of(method: &str, uri: &str) -> StatusCode {
        let request = HttpRequest::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        create_test_router()
            .oneshot(request)
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_statuses_pass_through_unchanged() {
        assert_eq!(status_of("GET", "/api/ping").await, StatusCode::OK);
        assert_eq!(status_of("POST", "/api/tts").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_of("GET", "/api/voices").await, StatusCode::BAD_GATEWAY);
        assert_eq!(status_of("GET", "/missing").await, StatusCode::NOT_FOUND);
    }
}
