//! Fake Speech Endpoint - 用于测试与离线演示的端点
//!
//! 按脚本顺序返回预置响应，并记录调用次数与最后一次请求

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use crate::application::ports::{ApiKey, SpeechEndpointPort};
use crate::application::SpeechError;
use crate::domain::synthesis::ProviderPayload;
use crate::domain::voice::VoiceDescriptor;

/// Fake Speech Endpoint
///
/// 脚本为空时：音色列表返回空，合成返回网络错误
pub struct FakeSpeechEndpoint {
    name: &'static str,
    audio_script: Mutex<VecDeque<Result<String, SpeechError>>>,
    voices_script: Mutex<VecDeque<Result<Vec<VoiceDescriptor>, SpeechError>>>,
    last_payload: Mutex<Option<ProviderPayload>>,
    last_credential: Mutex<Option<String>>,
    synthesize_calls: AtomicUsize,
    voice_calls: AtomicUsize,
}

impl FakeSpeechEndpoint {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            audio_script: Mutex::new(VecDeque::new()),
            voices_script: Mutex::new(VecDeque::new()),
            last_payload: Mutex::new(None),
            last_credential: Mutex::new(None),
            synthesize_calls: AtomicUsize::new(0),
            voice_calls: AtomicUsize::new(0),
        }
    }

    /// 预置一次成功的合成响应
    pub async fn push_audio(&self, audio_content: impl Into<String>) {
        self.audio_script
            .lock()
            .await
            .push_back(Ok(audio_content.into()));
    }

    /// 预置一次失败的合成响应
    pub async fn push_error(&self, error: SpeechError) {
        self.audio_script.lock().await.push_back(Err(error));
    }

    /// 预置一次音色列表响应
    pub async fn push_voices(&self, voices: Result<Vec<VoiceDescriptor>, SpeechError>) {
        self.voices_script.lock().await.push_back(voices);
    }

    pub fn synthesize_calls(&self) -> usize {
        self.synthesize_calls.load(Ordering::SeqCst)
    }

    pub fn voice_calls(&self) -> usize {
        self.voice_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.synthesize_calls() + self.voice_calls()
    }

    pub async fn last_payload(&self) -> Option<ProviderPayload> {
        self.last_payload.lock().await.clone()
    }

    pub async fn last_credential(&self) -> Option<String> {
        self.last_credential.lock().await.clone()
    }

    async fn record_credential(&self, credential: Option<&ApiKey>) {
        *self.last_credential.lock().await = credential.map(|k| k.expose().to_string());
    }
}

#[async_trait]
impl SpeechEndpointPort for FakeSpeechEndpoint {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn list_voices(
        &self,
        credential: Option<&ApiKey>,
    ) -> Result<Vec<VoiceDescriptor>, SpeechError> {
        self.voice_calls.fetch_add(1, Ordering::SeqCst);
        self.record_credential(credential).await;
        self.voices_script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn synthesize(
        &self,
        payload: &ProviderPayload,
        credential: Option<&ApiKey>,
    ) -> Result<String, SpeechError> {
        self.synthesize_calls.fetch_add(1, Ordering::SeqCst);
        self.record_credential(credential).await;
        *self.last_payload.lock().await = Some(payload.clone());

        tracing::debug!(
            endpoint = self.name,
            text_len = payload.input.text.len(),
            "FakeSpeechEndpoint: returning scripted response"
        );

        self.audio_script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(SpeechError::network("no scripted response")))
    }
}
