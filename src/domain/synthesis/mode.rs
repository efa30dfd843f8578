//! Execution Mode - 凭证路径与端点选择

use serde::{Deserialize, Serialize};

/// 执行模式
///
/// - `DirectClient`: 客户端持有密钥，直接调用提供方
/// - `BackendProxy`: 经由本地代理，由服务端注入密钥
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionMode {
    #[default]
    #[serde(rename = "direct", alias = "direct_client")]
    DirectClient,
    #[serde(rename = "proxy", alias = "backend_proxy")]
    BackendProxy,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectClient => "direct",
            Self::BackendProxy => "proxy",
        }
    }

    /// 模式切换时的提示文案
    pub fn switch_notice(&self) -> &'static str {
        match self {
            Self::DirectClient => "Switched to Demo Mode (Client Key)",
            Self::BackendProxy => "Switched to Backend Proxy mode",
        }
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "direct" | "direct_client" | "client" => Ok(Self::DirectClient),
            "proxy" | "backend_proxy" | "backend" => Ok(Self::BackendProxy),
            other => Err(format!("unknown execution mode: {}", other)),
        }
    }
}
