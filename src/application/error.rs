//! 应用层错误定义
//!
//! 语音目录、请求构建、模式分发、音频解码的统一失败类型，
//! 在 GenerationLifecycle 边界被转换为用户可见的通知

use thiserror::Error;

use crate::domain::synthesis::SynthesisValidationError;

/// 应用层错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpeechError {
    /// DirectClient 模式下未配置客户端密钥
    #[error("API Key required in Demo Mode")]
    CredentialMissing,

    /// 传输层失败（连接、超时、读取响应体）
    #[error("Network error: {0}")]
    Network(String),

    /// 提供方或代理返回非 2xx
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// 音频内容不是合法的 base64
    #[error("Failed to decode audio: {0}")]
    Decode(String),

    /// 请求校验失败
    #[error("{0}")]
    Validation(String),

    /// 已有生成请求在进行中
    #[error("A generation is already in progress")]
    Busy,
}

impl SpeechError {
    /// 创建上游错误
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// 创建网络错误
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// 创建校验错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 面向用户的提示文案
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// 上游 HTTP 状态码（如有）
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<SynthesisValidationError> for SpeechError {
    fn from(err: SynthesisValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
