//! Proxy TTS Client - 经由本地代理访问提供方
//!
//! 实现 SpeechEndpointPort trait；密钥只存在于代理服务端，本端从不发送
//!
//! 代理 API:
//! GET  {proxy}/api/voices -> {"voices": [...]}
//! POST {proxy}/api/tts    -> {"audioContent": "<base64>", "message": "Success"}
//! 错误: {"error": "..."}

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

use super::google_client::transport_error;
use crate::application::ports::{ApiKey, SpeechEndpointPort};
use crate::application::SpeechError;
use crate::domain::synthesis::ProviderPayload;
use crate::domain::voice::VoiceDescriptor;
use crate::infrastructure::http::dto::{ErrorBody, TtsRequest, TtsResponse, VoicesResponse};

pub const DEFAULT_PROXY_URL: &str = "http://localhost:3000";

/// 代理客户端配置
#[derive(Debug, Clone)]
pub struct ProxyTtsClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ProxyTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROXY_URL.to_string(),
            timeout_secs: 60,
        }
    }
}

impl ProxyTtsClientConfig {
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

pub struct ProxyTtsClient {
    client: Client,
    config: ProxyTtsClientConfig,
}

impl ProxyTtsClient {
    pub fn new(config: ProxyTtsClientConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

/// 代理错误：`error` 字段原样透传，缺失时使用兜底文案
async fn proxy_error(response: Response, fallback: &str) -> SpeechError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .map(|body| body.error)
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| fallback.to_string());

    SpeechError::upstream(status, message)
}

#[async_trait]
impl SpeechEndpointPort for ProxyTtsClient {
    fn name(&self) -> &'static str {
        "proxy"
    }

    async fn list_voices(
        &self,
        _credential: Option<&ApiKey>,
    ) -> Result<Vec<VoiceDescriptor>, SpeechError> {
        let response = self
            .client
            .get(self.url("/api/voices"))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(proxy_error(response, "Failed to fetch voices from server").await);
        }

        let body: VoicesResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::Decode(format!("Invalid voices response: {}", e)))?;

        Ok(body.voices)
    }

    async fn synthesize(
        &self,
        payload: &ProviderPayload,
        _credential: Option<&ApiKey>,
    ) -> Result<String, SpeechError> {
        let request = TtsRequest::from(payload);

        tracing::debug!(
            url = %self.url("/api/tts"),
            text_len = payload.input.text.len(),
            "Sending proxy synthesize request"
        );

        let response = self
            .client
            .post(self.url("/api/tts"))
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(proxy_error(response, "Server Error").await);
        }

        let body: TtsResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::Decode(format!("Invalid proxy response: {}", e)))?;

        Ok(body.audio_content)
    }
}
