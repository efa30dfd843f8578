//! Execution Mode Router
//!
//! 按执行模式选择端点：
//! - DirectClient: 直连提供方，附带客户端密钥；缺少密钥时不发起请求
//! - BackendProxy: 发往本地代理，由代理注入服务端密钥
//!
//! 两条路径都归一化为同一个 base64 `audioContent`

use std::sync::Arc;

use super::error::SpeechError;
use super::ports::{ApiKey, SpeechEndpointPort};
use crate::domain::synthesis::{DispatchPlan, ExecutionMode};
use crate::domain::voice::VoiceDescriptor;

pub struct ExecutionModeRouter {
    direct: Arc<dyn SpeechEndpointPort>,
    proxy: Arc<dyn SpeechEndpointPort>,
}

impl ExecutionModeRouter {
    pub fn new(direct: Arc<dyn SpeechEndpointPort>, proxy: Arc<dyn SpeechEndpointPort>) -> Self {
        Self { direct, proxy }
    }

    /// 解析本次调用使用的端点与凭证
    fn route<'a>(
        &'a self,
        mode: ExecutionMode,
        credential: Option<&'a ApiKey>,
    ) -> Result<(&'a dyn SpeechEndpointPort, Option<&'a ApiKey>), SpeechError> {
        match mode {
            ExecutionMode::DirectClient => {
                let key = credential.ok_or(SpeechError::CredentialMissing)?;
                Ok((self.direct.as_ref(), Some(key)))
            }
            ExecutionMode::BackendProxy => Ok((self.proxy.as_ref(), None)),
        }
    }

    /// 拉取音色列表
    pub async fn fetch_voices(
        &self,
        mode: ExecutionMode,
        credential: Option<&ApiKey>,
    ) -> Result<Vec<VoiceDescriptor>, SpeechError> {
        let (endpoint, credential) = self.route(mode, credential)?;
        tracing::debug!(mode = %mode, endpoint = endpoint.name(), "Fetching voice list");
        endpoint.list_voices(credential).await
    }

    /// 分发合成请求
    pub async fn dispatch(
        &self,
        plan: &DispatchPlan,
        credential: Option<&ApiKey>,
    ) -> Result<String, SpeechError> {
        let (endpoint, credential) = self.route(plan.mode, credential)?;
        tracing::debug!(
            mode = %plan.mode,
            endpoint = endpoint.name(),
            voice = %plan.voice_name(),
            text_len = plan.payload.input.text.len(),
            "Dispatching synthesis request"
        );
        endpoint.synthesize(&plan.payload, credential).await
    }
}
