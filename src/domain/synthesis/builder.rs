//! Synthesis Request Builder
//!
//! 无论走哪种执行模式，产出的请求体完全一致；模式只决定传输与凭证注入方式

use super::{
    AudioConfig, AudioEncoding, ExecutionMode, GenerationRequest, ProviderPayload,
    SynthesisInput, SynthesisValidationError, VoiceSelection,
};

/// 一次分发计划：请求体 + 传输元数据
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchPlan {
    pub mode: ExecutionMode,
    pub payload: ProviderPayload,
}

impl DispatchPlan {
    pub fn voice_name(&self) -> &str {
        &self.payload.voice.name
    }
}

/// 构建提供方请求体
pub fn build(
    request: &GenerationRequest,
    mode: ExecutionMode,
) -> Result<DispatchPlan, SynthesisValidationError> {
    if request.text.is_empty() {
        return Err(SynthesisValidationError::EmptyText);
    }
    let settings = &request.settings;
    settings.validate()?;

    let payload = ProviderPayload {
        input: SynthesisInput {
            text: request.text.clone(),
        },
        voice: VoiceSelection {
            language_code: settings.language_code.clone(),
            name: settings.voice_name.clone(),
            ssml_gender: settings.ssml_gender,
        },
        audio_config: AudioConfig {
            audio_encoding: AudioEncoding::Mp3,
            speaking_rate: settings.effective_speed(),
            pitch: settings.effective_pitch(),
        },
    };

    Ok(DispatchPlan { mode, payload })
}
