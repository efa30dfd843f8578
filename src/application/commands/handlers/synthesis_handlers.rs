//! Synthesis Command Handlers

use std::sync::Arc;

use crate::application::commands::SynthesizeSpeech;
use crate::application::error::SpeechError;
use crate::application::ports::CredentialStorePort;
use crate::application::router::ExecutionModeRouter;
use crate::domain::synthesis::{build, ExecutionMode};

/// 合成结果（尚未解码）
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedSpeech {
    pub audio_content: String,
    pub voice_name: String,
    pub mode: ExecutionMode,
}

/// SynthesizeSpeech Handler
///
/// 构建请求体 → 按模式分发 → 返回 base64 音频内容
pub struct SynthesizeSpeechHandler {
    router: Arc<ExecutionModeRouter>,
    credentials: Arc<dyn CredentialStorePort>,
}

impl SynthesizeSpeechHandler {
    pub fn new(
        router: Arc<ExecutionModeRouter>,
        credentials: Arc<dyn CredentialStorePort>,
    ) -> Self {
        Self {
            router,
            credentials,
        }
    }

    pub async fn handle(
        &self,
        command: SynthesizeSpeech,
    ) -> Result<SynthesizedSpeech, SpeechError> {
        let mode = self.credentials.mode();
        let plan = build(&command.request, mode)?;
        let key = self.credentials.api_key();

        let audio_content = self.router.dispatch(&plan, key.as_ref()).await?;

        tracing::info!(
            mode = %mode,
            voice = %plan.voice_name(),
            audio_content_len = audio_content.len(),
            "Speech synthesized"
        );

        Ok(SynthesizedSpeech {
            audio_content,
            voice_name: plan.payload.voice.name,
            mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::synthesis::{GenerationRequest, SynthesisSettings};
    use crate::infrastructure::adapters::FakeSpeechEndpoint;
    use crate::infrastructure::memory::StaticCredentialStore;

    fn handler(
        mode: ExecutionMode,
        key: Option<&str>,
    ) -> (Arc<FakeSpeechEndpoint>, Arc<FakeSpeechEndpoint>, SynthesizeSpeechHandler) {
        let direct = Arc::new(FakeSpeechEndpoint::new("direct"));
        let proxy = Arc::new(FakeSpeechEndpoint::new("proxy"));
        let router = Arc::new(ExecutionModeRouter::new(direct.clone(), proxy.clone()));
        let credentials = Arc::new(StaticCredentialStore::new(mode, key.map(str::to_string)));
        (direct, proxy, SynthesizeSpeechHandler::new(router, credentials))
    }

    #[tokio::test]
    async fn test_empty_text_fails_before_dispatch() {
        let (direct, _, handler) = handler(ExecutionMode::DirectClient, Some("key"));
        let command = SynthesizeSpeech {
            request: GenerationRequest::new("", SynthesisSettings::default()),
        };

        let err = handler.handle(command).await.unwrap_err();
        assert_eq!(err, SpeechError::Validation("Text is required.".to_string()));
        assert_eq!(direct.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_same_payload_reaches_either_endpoint() {
        let settings = SynthesisSettings {
            voice_name: "en-US-Journey-D".to_string(),
            ..Default::default()
        };
        let request = GenerationRequest::new("Hello world", settings);

        let (direct, _, direct_handler) = handler(ExecutionMode::DirectClient, Some("key"));
        direct.push_audio("SGVsbG8=").await;
        direct_handler
            .handle(SynthesizeSpeech {
                request: request.clone(),
            })
            .await
            .unwrap();

        let (_, proxy, proxy_handler) = handler(ExecutionMode::BackendProxy, None);
        proxy.push_audio("SGVsbG8=").await;
        let result = proxy_handler
            .handle(SynthesizeSpeech { request })
            .await
            .unwrap();

        assert_eq!(result.voice_name, "en-US-Journey-D");
        assert_eq!(result.mode, ExecutionMode::BackendProxy);
        assert_eq!(direct.last_payload().await, proxy.last_payload().await);
    }
}
