//! Speech Session - 会话上下文
//!
//! 持有合成参数、音色目录状态、输入文本、生命周期与当前结果。
//! 每个字段只由本对象写入；执行模式与密钥每次调用时从凭证存储读取

use chrono::Utc;
use std::sync::Arc;

use super::audio_result::AudioResultHandler;
use super::commands::handlers::SynthesizeSpeechHandler;
use super::commands::SynthesizeSpeech;
use super::error::SpeechError;
use super::lifecycle::{GenerationLifecycle, LifecycleStatus, Notification, NotificationLevel};
use super::ports::{AudioStorePort, CredentialStorePort};
use super::queries::handlers::FetchVoicesHandler;
use super::queries::FetchVoices;
use super::router::ExecutionModeRouter;
use crate::domain::audio::GenerationResult;
use crate::domain::synthesis::{
    GenerationRequest, SynthesisSettings, SynthesisValidationError, TextStats, MAX_TEXT_CHARS,
    WARN_TEXT_CHARS,
};
use crate::domain::voice::{languages_of, voices_for, VoiceCatalog, VoiceDescriptor};

pub const SAMPLE_TEXT: &str = "Artificial intelligence (AI) is intelligence associated with computational devices. It stands in contrast to natural intelligence, which is the province of humans and animals.";

/// 音色目录在会话中的状态
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    /// 尚未拉取或正在拉取
    Loading,
    /// DirectClient 模式缺少密钥
    CredentialRequired,
    /// 拉取失败，音色选择不可用（不阻塞文本输入与已有播放）
    Unavailable(String),
    Ready(VoiceCatalog),
}

impl CatalogState {
    pub fn catalog(&self) -> Option<&VoiceCatalog> {
        match self {
            Self::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }
}

/// 文本长度阈值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLimits {
    pub warn_chars: usize,
    pub max_chars: usize,
}

impl Default for TextLimits {
    fn default() -> Self {
        Self {
            warn_chars: WARN_TEXT_CHARS,
            max_chars: MAX_TEXT_CHARS,
        }
    }
}

pub struct SpeechSession {
    fetch_voices_handler: FetchVoicesHandler,
    synthesize_handler: SynthesizeSpeechHandler,
    audio: AudioResultHandler,
    credentials: Arc<dyn CredentialStorePort>,
    limits: TextLimits,

    settings: SynthesisSettings,
    catalog: CatalogState,
    voices: Vec<VoiceDescriptor>,
    text: String,
    lifecycle: GenerationLifecycle,
    current: Option<GenerationResult>,
}

impl SpeechSession {
    pub fn new(
        router: Arc<ExecutionModeRouter>,
        credentials: Arc<dyn CredentialStorePort>,
        audio_store: Arc<dyn AudioStorePort>,
    ) -> Self {
        Self {
            fetch_voices_handler: FetchVoicesHandler::new(router.clone(), credentials.clone()),
            synthesize_handler: SynthesizeSpeechHandler::new(router, credentials.clone()),
            audio: AudioResultHandler::new(audio_store),
            credentials,
            limits: TextLimits::default(),
            settings: SynthesisSettings::default(),
            catalog: CatalogState::Loading,
            voices: Vec::new(),
            text: String::new(),
            lifecycle: GenerationLifecycle::new(),
            current: None,
        }
    }

    pub fn with_settings(mut self, settings: SynthesisSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_text_limits(mut self, limits: TextLimits) -> Self {
        self.limits = limits;
        self
    }

    // ========== Voice catalog ==========

    /// 重新拉取音色目录
    ///
    /// 成功后保留当前语言（若仍可用），否则取第一个语言，并自动选中该语言的首个音色
    pub async fn refresh_voices(&mut self) -> &CatalogState {
        self.catalog = CatalogState::Loading;

        match self.fetch_voices_handler.handle(FetchVoices).await {
            Ok(catalog) => {
                let languages = languages_of(&catalog);
                let language = if languages.contains(&self.settings.language_code) {
                    self.settings.language_code.clone()
                } else {
                    languages
                        .first()
                        .cloned()
                        .unwrap_or_else(|| self.settings.language_code.clone())
                };
                self.catalog = CatalogState::Ready(catalog);
                self.select_language(&language);
            }
            Err(SpeechError::CredentialMissing) => {
                tracing::info!("Voice catalog needs a client API key");
                self.catalog = CatalogState::CredentialRequired;
                self.reset_voices();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load voice catalog");
                self.lifecycle.notify(
                    NotificationLevel::Error,
                    "Could not load voice list. Check API Key.",
                );
                self.catalog = CatalogState::Unavailable(e.user_message());
                self.reset_voices();
            }
        }

        &self.catalog
    }

    fn reset_voices(&mut self) {
        self.voices.clear();
        self.settings.clear_voice();
    }

    pub fn catalog_state(&self) -> &CatalogState {
        &self.catalog
    }

    /// 目录中的语言（字典序）
    pub fn languages(&self) -> Vec<String> {
        self.catalog.catalog().map(languages_of).unwrap_or_default()
    }

    /// 切换语言，重新推导候选音色并选中第一个；无候选时清空音色
    pub fn select_language(&mut self, language_code: &str) -> &[VoiceDescriptor] {
        self.settings.language_code = language_code.to_string();
        self.voices = self
            .catalog
            .catalog()
            .map(|catalog| voices_for(catalog, language_code))
            .unwrap_or_default();

        match self.voices.first() {
            Some(first) => self.settings.use_voice(first),
            None => self.settings.clear_voice(),
        }

        &self.voices
    }

    /// 当前语言的候选音色（已排序）
    pub fn voices(&self) -> &[VoiceDescriptor] {
        &self.voices
    }

    /// 选中音色，必须属于当前语言的候选列表
    pub fn select_voice(&mut self, name: &str) -> Result<(), SpeechError> {
        let voice = self
            .voices
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| SynthesisValidationError::UnknownVoice {
                voice: name.to_string(),
                language: self.settings.language_code.clone(),
            })?;
        self.settings.use_voice(voice);
        Ok(())
    }

    // ========== Settings & text ==========

    pub fn settings(&self) -> &SynthesisSettings {
        &self.settings
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.settings.speed = Some(speed);
    }

    pub fn set_pitch(&mut self, pitch: f64) {
        self.settings.pitch = Some(pitch);
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> TextStats {
        self.text = text.into();
        self.text_stats()
    }

    pub fn clear_text(&mut self) -> TextStats {
        self.set_text(String::new())
    }

    pub fn use_sample_text(&mut self) -> TextStats {
        self.set_text(SAMPLE_TEXT)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_stats(&self) -> TextStats {
        TextStats::measure(&self.text, self.limits.warn_chars, self.limits.max_chars)
    }

    // ========== Generation ==========

    /// 生成音频
    ///
    /// 成功时取代并释放上一次的资源；失败时保留上一次成功结果，仅更新状态与通知
    pub async fn generate(&mut self) -> Result<GenerationResult, SpeechError> {
        self.lifecycle.begin(&self.text)?;
        tracing::info!(
            mode = %self.credentials.mode(),
            voice = %self.settings.voice_name,
            text_len = self.text.len(),
            "Generating speech"
        );

        let outcome = self.synthesize_and_materialize().await;

        match outcome {
            Ok(result) => {
                self.lifecycle.succeed();
                if let Some(previous) = self.current.replace(result.clone()) {
                    self.audio.release(&previous.audio);
                }
                Ok(result)
            }
            Err(e) => {
                tracing::error!(error = %e, "Speech generation failed");
                self.lifecycle.fail(&e);
                Err(e)
            }
        }
    }

    async fn synthesize_and_materialize(&self) -> Result<GenerationResult, SpeechError> {
        let request = GenerationRequest::new(self.text.clone(), self.settings.clone());
        let synthesized = self
            .synthesize_handler
            .handle(SynthesizeSpeech { request })
            .await?;

        let generated_at = Utc::now();
        let audio = self.audio.materialize(
            &synthesized.audio_content,
            &synthesized.voice_name,
            generated_at,
        )?;

        Ok(GenerationResult {
            audio,
            voice_name: synthesized.voice_name,
            generated_at,
        })
    }

    pub fn current_result(&self) -> Option<&GenerationResult> {
        self.current.as_ref()
    }

    /// 当前结果的可播放数据；句柄已撤销时返回 None
    pub fn current_audio(&self) -> Option<Arc<[u8]>> {
        self.current
            .as_ref()
            .and_then(|result| self.audio.resolve(&result.audio.handle))
    }

    pub fn live_audio_resources(&self) -> usize {
        self.audio.live_resources()
    }

    pub fn lifecycle(&self) -> &GenerationLifecycle {
        &self.lifecycle
    }

    pub fn status(&self) -> &LifecycleStatus {
        self.lifecycle.status()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.lifecycle.drain_notifications()
    }
}

impl Drop for SpeechSession {
    fn drop(&mut self) {
        if let Some(result) = self.current.take() {
            self.audio.release(&result.audio);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::synthesis::ExecutionMode;
    use crate::domain::voice::SsmlGender;
    use crate::infrastructure::adapters::FakeSpeechEndpoint;
    use crate::infrastructure::memory::{InMemoryAudioStore, StaticCredentialStore};

    struct Harness {
        direct: Arc<FakeSpeechEndpoint>,
        proxy: Arc<FakeSpeechEndpoint>,
        store: Arc<InMemoryAudioStore>,
        session: SpeechSession,
    }

    fn harness(mode: ExecutionMode, key: Option<&str>) -> Harness {
        let direct = Arc::new(FakeSpeechEndpoint::new("direct"));
        let proxy = Arc::new(FakeSpeechEndpoint::new("proxy"));
        let store = Arc::new(InMemoryAudioStore::new());
        let router = Arc::new(ExecutionModeRouter::new(direct.clone(), proxy.clone()));
        let credentials = Arc::new(StaticCredentialStore::new(mode, key.map(str::to_string)));
        let session = SpeechSession::new(router, credentials, store.clone());
        Harness {
            direct,
            proxy,
            store,
            session,
        }
    }

    fn catalog_voices() -> Vec<VoiceDescriptor> {
        vec![
            VoiceDescriptor::new("en-US-Standard-A", ["en-US"], SsmlGender::Female),
            VoiceDescriptor::new("en-US-Journey-D", ["en-US"], SsmlGender::Male),
            VoiceDescriptor::new("de-DE-Neural2-B", ["de-DE"], SsmlGender::Male),
        ]
    }

    #[tokio::test]
    async fn test_scenario_proxy_success() {
        let mut h = harness(ExecutionMode::BackendProxy, None);
        h.proxy.push_audio("SGVsbG8=").await;

        h.session.set_text("Hello world");
        let result = h.session.generate().await.unwrap();

        assert_eq!(result.audio_bytes(), b"Hello");
        assert_eq!(h.session.status(), &LifecycleStatus::Success);
        assert_eq!(h.proxy.synthesize_calls(), 1);
        assert_eq!(h.direct.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_scenario_direct_without_key() {
        let mut h = harness(ExecutionMode::DirectClient, None);

        h.session.set_text("Hello world");
        let err = h.session.generate().await.unwrap_err();

        assert_eq!(err, SpeechError::CredentialMissing);
        assert_eq!(h.direct.total_calls(), 0);
        assert_eq!(h.proxy.total_calls(), 0);
        assert!(matches!(h.session.status(), LifecycleStatus::Error(_)));

        let notes = h.session.drain_notifications();
        assert_eq!(notes.last().unwrap().message, "API Key required in Demo Mode");
    }

    #[tokio::test]
    async fn test_scenario_proxy_error_keeps_previous_audio() {
        let mut h = harness(ExecutionMode::BackendProxy, None);
        h.proxy.push_audio("SGVsbG8=").await;
        h.proxy
            .push_error(SpeechError::upstream(500, "Server API key not configured."))
            .await;

        h.session.set_text("Hello world");
        let first = h.session.generate().await.unwrap();

        let err = h.session.generate().await.unwrap_err();
        assert_eq!(err.user_message(), "Server API key not configured.");
        assert_eq!(
            h.session.status(),
            &LifecycleStatus::Error("Server API key not configured.".to_string())
        );

        let current = h.session.current_result().unwrap();
        assert_eq!(current.audio.handle, first.audio.handle);
        assert_eq!(h.session.current_audio().as_deref(), Some(&b"Hello"[..]));
    }

    #[tokio::test]
    async fn test_second_generation_releases_first() {
        let mut h = harness(ExecutionMode::BackendProxy, None);
        h.proxy.push_audio("SGVsbG8=").await;
        h.proxy.push_audio("V29ybGQ=").await;

        h.session.set_text("Hello");
        let first = h.session.generate().await.unwrap();
        let second = h.session.generate().await.unwrap();

        assert_ne!(first.audio.handle, second.audio.handle);
        assert_eq!(second.audio_bytes(), b"World");
        assert!(h.store.resolve(&first.audio.handle).is_none());
        assert!(h.store.resolve(&second.audio.handle).is_some());
        assert_eq!(h.session.live_audio_resources(), 1);
    }

    #[tokio::test]
    async fn test_decode_failure_is_error_state() {
        let mut h = harness(ExecutionMode::BackendProxy, None);
        h.proxy.push_audio("%%%").await;

        h.session.set_text("Hello");
        let err = h.session.generate().await.unwrap_err();
        assert!(matches!(err, SpeechError::Decode(_)));
        assert!(matches!(h.session.status(), LifecycleStatus::Error(_)));
        assert!(h.session.current_result().is_none());
    }

    #[tokio::test]
    async fn test_empty_text_does_not_start_generation() {
        let mut h = harness(ExecutionMode::BackendProxy, None);
        let err = h.session.generate().await.unwrap_err();
        assert!(matches!(err, SpeechError::Validation(_)));
        assert_eq!(h.session.status(), &LifecycleStatus::Idle);
        assert_eq!(h.proxy.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_refresh_selects_first_voice() {
        let mut h = harness(ExecutionMode::DirectClient, Some("key"));
        h.direct.push_voices(Ok(catalog_voices())).await;

        let state = h.session.refresh_voices().await;
        assert!(matches!(state, CatalogState::Ready(_)));
        assert_eq!(h.session.languages(), vec!["de-DE", "en-US"]);
        assert_eq!(h.session.settings().language_code, "en-US");
        assert_eq!(h.session.settings().voice_name, "en-US-Journey-D");
        assert_eq!(h.session.settings().ssml_gender, SsmlGender::Male);
    }

    #[tokio::test]
    async fn test_refresh_falls_back_to_first_language() {
        let mut h = harness(ExecutionMode::DirectClient, Some("key"));
        h.direct
            .push_voices(Ok(vec![VoiceDescriptor::new(
                "fr-FR-Standard-A",
                ["fr-FR"],
                SsmlGender::Female,
            )]))
            .await;

        h.session.refresh_voices().await;
        assert_eq!(h.session.settings().language_code, "fr-FR");
        assert_eq!(h.session.settings().voice_name, "fr-FR-Standard-A");
    }

    #[tokio::test]
    async fn test_refresh_without_key_requires_credential() {
        let mut h = harness(ExecutionMode::DirectClient, None);
        let state = h.session.refresh_voices().await;
        assert_eq!(state, &CatalogState::CredentialRequired);
        assert_eq!(h.direct.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_refresh_failure_degrades_to_unavailable() {
        let mut h = harness(ExecutionMode::BackendProxy, None);
        h.proxy.push_audio("SGVsbG8=").await;
        h.proxy
            .push_voices(Err(SpeechError::upstream(500, "Server API Key missing")))
            .await;

        h.session.set_text("Hello");
        h.session.generate().await.unwrap();

        let state = h.session.refresh_voices().await;
        assert_eq!(
            state,
            &CatalogState::Unavailable("Server API Key missing".to_string())
        );
        assert!(h.session.voices().is_empty());
        assert!(h.session.current_audio().is_some());
        assert_eq!(h.session.text(), "Hello");

        let notes = h.session.drain_notifications();
        assert_eq!(
            notes.last().unwrap().message,
            "Could not load voice list. Check API Key."
        );
    }

    #[tokio::test]
    async fn test_language_without_voices_clears_selection() {
        let mut h = harness(ExecutionMode::DirectClient, Some("key"));
        h.direct.push_voices(Ok(catalog_voices())).await;
        h.session.refresh_voices().await;

        let voices = h.session.select_language("ja-JP");
        assert!(voices.is_empty());
        assert!(h.session.settings().voice_name.is_empty());

        let voices = h.session.select_language("de-DE");
        assert_eq!(voices[0].name, "de-DE-Neural2-B");
        assert_eq!(h.session.settings().voice_name, "de-DE-Neural2-B");
    }

    #[tokio::test]
    async fn test_select_voice_must_match_language() {
        let mut h = harness(ExecutionMode::DirectClient, Some("key"));
        h.direct.push_voices(Ok(catalog_voices())).await;
        h.session.refresh_voices().await;

        h.session.select_voice("en-US-Standard-A").unwrap();
        assert_eq!(h.session.settings().ssml_gender, SsmlGender::Female);

        let err = h.session.select_voice("de-DE-Neural2-B").unwrap_err();
        assert!(matches!(err, SpeechError::Validation(_)));
        assert_eq!(h.session.settings().voice_name, "en-US-Standard-A");
    }

    #[tokio::test]
    async fn test_generation_uses_selected_settings() {
        let mut h = harness(ExecutionMode::DirectClient, Some("key"));
        h.direct.push_voices(Ok(catalog_voices())).await;
        h.direct.push_audio("SGVsbG8=").await;
        h.session.refresh_voices().await;
        h.session.set_speed(1.5);
        h.session.set_pitch(-3.0);
        h.session.use_sample_text();

        let result = h.session.generate().await.unwrap();
        assert_eq!(result.voice_name, "en-US-Journey-D");
        assert!(result.audio.filename.starts_with("tts_"));
        assert!(result.audio.filename.ends_with("_en-US-Journey-D.mp3"));

        let payload = h.direct.last_payload().await.unwrap();
        assert_eq!(payload.input.text, SAMPLE_TEXT);
        assert_eq!(payload.audio_config.speaking_rate, 1.5);
        assert_eq!(payload.audio_config.pitch, -3.0);
        assert_eq!(h.direct.last_credential().await.as_deref(), Some("key"));
    }

    #[test]
    fn test_text_stats_use_limits() {
        let mut h = harness(ExecutionMode::BackendProxy, None);
        h.session = h.session.with_text_limits(TextLimits {
            warn_chars: 3,
            max_chars: 5,
        });
        let stats = h.session.set_text("abcd");
        assert!(stats.near_limit);
        assert!(!stats.over_limit);
        assert!(h.session.clear_text().chars == 0);
    }
}
