//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::SpeechError;
use crate::application::ports::CredentialStorePort;
use crate::application::queries::FetchVoices;
use crate::application::router::ExecutionModeRouter;
use crate::domain::voice::VoiceCatalog;

/// FetchVoices Handler
///
/// DirectClient 模式且无密钥时返回 `CredentialMissing`，不发起网络请求
pub struct FetchVoicesHandler {
    router: Arc<ExecutionModeRouter>,
    credentials: Arc<dyn CredentialStorePort>,
}

impl FetchVoicesHandler {
    pub fn new(
        router: Arc<ExecutionModeRouter>,
        credentials: Arc<dyn CredentialStorePort>,
    ) -> Self {
        Self {
            router,
            credentials,
        }
    }

    pub async fn handle(&self, _query: FetchVoices) -> Result<VoiceCatalog, SpeechError> {
        let mode = self.credentials.mode();
        let key = self.credentials.api_key();

        let voices = self.router.fetch_voices(mode, key.as_ref()).await?;

        tracing::info!(mode = %mode, voices = voices.len(), "Voice catalog fetched");

        Ok(VoiceCatalog::from_voices(voices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::synthesis::ExecutionMode;
    use crate::domain::voice::{SsmlGender, VoiceDescriptor};
    use crate::infrastructure::adapters::FakeSpeechEndpoint;
    use crate::infrastructure::memory::StaticCredentialStore;

    #[tokio::test]
    async fn test_fetch_builds_catalog() {
        let direct = Arc::new(FakeSpeechEndpoint::new("direct"));
        let proxy = Arc::new(FakeSpeechEndpoint::new("proxy"));
        proxy
            .push_voices(Ok(vec![VoiceDescriptor::new(
                "en-US-Journey-D",
                ["en-US"],
                SsmlGender::Male,
            )]))
            .await;

        let router = Arc::new(ExecutionModeRouter::new(direct, proxy.clone()));
        let credentials = Arc::new(StaticCredentialStore::new(ExecutionMode::BackendProxy, None));
        let handler = FetchVoicesHandler::new(router, credentials);

        let catalog = handler.handle(FetchVoices).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(proxy.voice_calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_voices_is_empty_catalog() {
        let direct = Arc::new(FakeSpeechEndpoint::new("direct"));
        let proxy = Arc::new(FakeSpeechEndpoint::new("proxy"));
        direct.push_voices(Ok(Vec::new())).await;

        let router = Arc::new(ExecutionModeRouter::new(direct, proxy));
        let credentials = Arc::new(StaticCredentialStore::new(
            ExecutionMode::DirectClient,
            Some("key".to_string()),
        ));
        let handler = FetchVoicesHandler::new(router, credentials);

        let catalog = handler.handle(FetchVoices).await.unwrap();
        assert!(catalog.is_empty());
    }
}
