//! Speech Endpoint Port - 语音合成端点抽象
//!
//! 提供方直连与本地代理都实现此接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;

use super::ApiKey;
use crate::application::error::SpeechError;
use crate::domain::synthesis::ProviderPayload;
use crate::domain::voice::VoiceDescriptor;

/// Speech Endpoint Port
///
/// 非 2xx 响应统一转换为 `SpeechError::Upstream`，消息优先取自对端错误信封
#[async_trait]
pub trait SpeechEndpointPort: Send + Sync {
    /// 端点名称（用于日志）
    fn name(&self) -> &'static str;

    /// 拉取音色列表，零个音色时返回空列表而非错误
    async fn list_voices(
        &self,
        credential: Option<&ApiKey>,
    ) -> Result<Vec<VoiceDescriptor>, SpeechError>;

    /// 执行合成，返回 base64 编码的音频内容
    async fn synthesize(
        &self,
        payload: &ProviderPayload,
        credential: Option<&ApiKey>,
    ) -> Result<String, SpeechError>;
}
