//! Static Credential Store Implementation

use crate::application::ports::{ApiKey, CredentialStorePort};
use crate::domain::synthesis::ExecutionMode;

/// 由配置或命令行参数构造的只读凭证
#[derive(Debug, Clone)]
pub struct StaticCredentialStore {
    mode: ExecutionMode,
    api_key: Option<ApiKey>,
}

impl StaticCredentialStore {
    pub fn new(mode: ExecutionMode, api_key: Option<String>) -> Self {
        Self {
            mode,
            api_key: api_key.and_then(ApiKey::new),
        }
    }
}

impl CredentialStorePort for StaticCredentialStore {
    fn api_key(&self) -> Option<ApiKey> {
        self.api_key.clone()
    }

    fn mode(&self) -> ExecutionMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_absent() {
        let store = StaticCredentialStore::new(ExecutionMode::DirectClient, Some("  ".into()));
        assert!(store.api_key().is_none());
        assert_eq!(store.mode(), ExecutionMode::DirectClient);
    }
}
