//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping    GET   健康检查
//! - /api/voices  GET   音色列表（服务端密钥）
//! - /api/tts     POST  合成语音（服务端密钥）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/voices", get(handlers::list_voices))
        .route("/tts", post(handlers::synthesize))
}
