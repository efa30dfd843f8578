//! HTTP Layer - 本地代理服务器
//!
//! 持有服务端密钥，为 BackendProxy 模式转发音色与合成请求

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ProxyError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::{AppState, ProxyLimits};
