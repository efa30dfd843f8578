//! HTTP Error Handling - 代理错误响应
//!
//! 所有失败都以 `{"error": "<message>"}` 返回，状态码与失败原因一致

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;

use super::dto::ErrorBody;
use crate::application::SpeechError;

/// 代理错误
#[derive(Debug)]
pub enum ProxyError {
    BadRequest(String),
    Internal(String),
    /// 上游非 2xx，原样透传状态码与消息
    Upstream { status: u16, message: String },
}

impl ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    fn message(&self) -> &str {
        match self {
            ProxyError::BadRequest(msg) | ProxyError::Internal(msg) => msg,
            ProxyError::Upstream { message, .. } => message,
        }
    }

    /// 将端点错误转换为代理错误，传输失败时使用兜底文案
    pub fn from_speech(err: SpeechError, fallback: &str) -> Self {
        match err {
            SpeechError::Upstream { status, message } => ProxyError::Upstream { status, message },
            SpeechError::Validation(msg) => ProxyError::BadRequest(msg),
            SpeechError::Network(msg) | SpeechError::Decode(msg) if !msg.is_empty() => {
                ProxyError::Internal(msg)
            }
            _ => ProxyError::Internal(fallback.to_string()),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.message(), "Proxy request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.message(), "Proxy request rejected");
        }

        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
