//! Credential Store Port - 凭证与执行模式来源
//!
//! 由外部协作者持久化，核心只读

use crate::domain::synthesis::ExecutionMode;

/// API 密钥，Debug 输出时隐藏内容
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// 空白字符串视为未配置
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Credential Store Port
pub trait CredentialStorePort: Send + Sync {
    /// 客户端持有的密钥
    fn api_key(&self) -> Option<ApiKey>;

    /// 持久化的执行模式
    fn mode(&self) -> ExecutionMode;
}
