//! Application State
//!
//! 代理持有服务端密钥与上游端点；密钥只在服务端注入，不回传给调用方

use std::sync::Arc;

use crate::application::{ApiKey, SpeechEndpointPort};
use crate::domain::synthesis::MAX_TEXT_CHARS;

/// 代理侧请求限制
#[derive(Debug, Clone, Copy)]
pub struct ProxyLimits {
    pub max_text_chars: usize,
    /// 是否在代理边界拒绝超长文本；语速/音调范围始终由 build() 校验
    pub enforce: bool,
}

impl Default for ProxyLimits {
    fn default() -> Self {
        Self {
            max_text_chars: MAX_TEXT_CHARS,
            enforce: true,
        }
    }
}

/// 应用状态
pub struct AppState {
    pub provider: Arc<dyn SpeechEndpointPort>,
    pub server_key: Option<ApiKey>,
    pub limits: ProxyLimits,
}

impl AppState {
    pub fn new(provider: Arc<dyn SpeechEndpointPort>, server_key: Option<ApiKey>) -> Self {
        Self {
            provider,
            server_key,
            limits: ProxyLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ProxyLimits) -> Self {
        self.limits = limits;
        self
    }
}
