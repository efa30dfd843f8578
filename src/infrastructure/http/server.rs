//! HTTP Server
//!
//! 本地代理服务器：API 路由 + 可选静态文件托管

use std::path::PathBuf;
use std::sync::Arc;

use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::request_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 静态文件目录（None 时不托管）
    pub static_dir: Option<PathBuf>,
    /// 静态文件 URL 前缀
    pub static_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: None,
            static_path: "/".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn with_static_path(mut self, path: impl Into<String>) -> Self {
        self.static_path = path.into();
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 构建 Router
    pub fn build_router(&self) -> Router {
        let mut router = create_routes().with_state(self.state.clone());

        if let Some(dir) = &self.config.static_dir {
            let path = self.config.static_path.trim_end_matches('/');
            info!(dir = %dir.display(), path = %self.config.static_path, "Serving static files");
            router = if path.is_empty() {
                router.fallback_service(ServeDir::new(dir))
            } else {
                router.nest_service(path, ServeDir::new(dir))
            };
        }

        router
            .layer(middleware::from_fn(request_logging_middleware))
            .layer(TraceLayer::new_for_http())
            // 浏览器端直接访问代理，允许所有来源
            .layer(CorsLayer::permissive())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting proxy server on http://{}", addr);
        if self.state.server_key.is_none() {
            tracing::warn!("No server API key configured; /api/tts and /api/voices will fail");
        }

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::FakeSpeechEndpoint;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn state() -> AppState {
        AppState::new(Arc::new(FakeSpeechEndpoint::new("google")), None)
    }

    #[test]
    fn test_config_addr() {
        let config = ServerConfig::new("127.0.0.1", 8080);
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(ServerConfig::default().port, 3000);
    }

    #[tokio::test]
    async fn test_static_files_are_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>voxora</h1>").unwrap();

        let server = HttpServer::new(
            ServerConfig::default().with_static_dir(dir.path()),
            state(),
        );
        let response = server
            .build_router()
            .oneshot(
                Request::builder()
                    .uri("/index.html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>voxora</h1>");
    }

    #[tokio::test]
    async fn test_static_files_under_prefix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.js"), "ok").unwrap();

        let server = HttpServer::new(
            ServerConfig::default()
                .with_static_dir(dir.path())
                .with_static_path("/ui"),
            state(),
        );
        let router = server.build_router();

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/ui/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_headers_present() {
        let server = HttpServer::new(ServerConfig::default(), state());
        let response = server
            .build_router()
            .oneshot(
                Request::builder()
                    .uri("/api/ping")
                    .header("origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}
