//! Google TTS Client - 直连语音提供方
//!
//! 实现 SpeechEndpointPort trait，以客户端密钥作为查询参数调用 REST 接口
//!
//! 提供方 API:
//! GET  {base}/v1/voices?key=...          -> {"voices": [...]}
//! POST {base}/v1/text:synthesize?key=... -> {"audioContent": "<base64>"}
//! 错误: {"error": {"message": "..."}}

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{ApiKey, SpeechEndpointPort};
use crate::application::SpeechError;
use crate::domain::synthesis::{ProviderPayload, SynthesisResponse};
use crate::domain::voice::VoiceDescriptor;

pub const DEFAULT_PROVIDER_URL: &str = "https://texttospeech.googleapis.com";

/// 音色列表响应；提供方对空列表可能省略字段
#[derive(Debug, Default, Deserialize)]
pub(crate) struct VoicesEnvelope {
    #[serde(default)]
    pub voices: Vec<VoiceDescriptor>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorEnvelope {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    message: String,
}

/// Google TTS 客户端配置
#[derive(Debug, Clone)]
pub struct GoogleTtsClientConfig {
    /// 提供方基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GoogleTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROVIDER_URL.to_string(),
            timeout_secs: 60,
        }
    }
}

impl GoogleTtsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

pub struct GoogleTtsClient {
    client: Client,
    config: GoogleTtsClientConfig,
}

impl GoogleTtsClient {
    pub fn new(config: GoogleTtsClientConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn voices_url(&self) -> String {
        format!("{}/v1/voices", self.config.base_url.trim_end_matches('/'))
    }

    fn synthesize_url(&self) -> String {
        format!(
            "{}/v1/text:synthesize",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn require_key(credential: Option<&ApiKey>) -> Result<&ApiKey, SpeechError> {
        credential.ok_or(SpeechError::CredentialMissing)
    }
}

/// 将 reqwest 传输错误转换为网络错误
pub(crate) fn transport_error(e: reqwest::Error) -> SpeechError {
    if e.is_timeout() {
        SpeechError::network("Request timed out")
    } else if e.is_connect() {
        SpeechError::network(format!("Cannot connect to speech service: {}", e))
    } else {
        SpeechError::network(e.to_string())
    }
}

/// 非 2xx 响应：优先取 error.message，其次原始响应体，最后使用兜底文案
async fn provider_error(response: Response, fallback: &str) -> SpeechError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ProviderErrorEnvelope>(&body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ if !body.trim().is_empty() => body,
        _ => fallback.to_string(),
    };

    SpeechError::upstream(status, message)
}

#[async_trait]
impl SpeechEndpointPort for GoogleTtsClient {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn list_voices(
        &self,
        credential: Option<&ApiKey>,
    ) -> Result<Vec<VoiceDescriptor>, SpeechError> {
        let key = Self::require_key(credential)?;

        tracing::debug!(url = %self.voices_url(), "Fetching provider voices");

        let response = self
            .client
            .get(self.voices_url())
            .query(&[("key", key.expose())])
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(provider_error(response, "Failed to fetch voices").await);
        }

        let envelope: VoicesEnvelope = response
            .json()
            .await
            .map_err(|e| SpeechError::Decode(format!("Invalid voices response: {}", e)))?;

        tracing::info!(voices = envelope.voices.len(), "Provider voices fetched");
        Ok(envelope.voices)
    }

    async fn synthesize(
        &self,
        payload: &ProviderPayload,
        credential: Option<&ApiKey>,
    ) -> Result<String, SpeechError> {
        let key = Self::require_key(credential)?;

        tracing::debug!(
            url = %self.synthesize_url(),
            text_len = payload.input.text.len(),
            voice = %payload.voice.name,
            "Sending synthesize request"
        );

        let response = self
            .client
            .post(self.synthesize_url())
            .query(&[("key", key.expose())])
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(provider_error(response, "API Error").await);
        }

        let body: SynthesisResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::Decode(format!("Invalid synthesize response: {}", e)))?;

        Ok(body.audio_content)
    }
}
