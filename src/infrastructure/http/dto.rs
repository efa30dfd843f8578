//! Data Transfer Objects - 本地代理接口
//!
//! 代理服务端与 ProxyTtsClient 共用同一组线上格式

use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::synthesis::{ProviderPayload, SynthesisSettings, DEFAULT_LANGUAGE};
use crate::domain::voice::{SsmlGender, VoiceDescriptor};

// ============================================================================
// 请求
// ============================================================================

/// POST /api/tts 请求体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice_settings: ProxyVoiceSettings,
}

/// 代理接收的合成参数，缺省字段由服务端补默认值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyVoiceSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_gender_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub ssml_gender: Option<SsmlGender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
}

/// 空字符串与缺省同义，由服务端补 NEUTRAL
fn blank_gender_as_none<'de, D>(deserializer: D) -> Result<Option<SsmlGender>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            SsmlGender::deserialize(IntoDeserializer::<D::Error>::into_deserializer(value))
                .map(Some)
        }
    }
}

impl ProxyVoiceSettings {
    /// 补齐默认值：en-US / NEUTRAL / 1.0 / 0.0
    pub fn into_settings(self) -> SynthesisSettings {
        let defaults = SynthesisSettings::default();
        SynthesisSettings {
            language_code: self
                .language_code
                .filter(|code| !code.is_empty())
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            voice_name: self.voice_name.unwrap_or_default(),
            ssml_gender: self.ssml_gender.unwrap_or_default(),
            speed: self.speed.or(defaults.speed),
            pitch: self.pitch.or(defaults.pitch),
        }
    }
}

impl From<&ProviderPayload> for TtsRequest {
    fn from(payload: &ProviderPayload) -> Self {
        Self {
            text: Some(payload.input.text.clone()),
            voice_settings: ProxyVoiceSettings {
                language_code: Some(payload.voice.language_code.clone()),
                voice_name: Some(payload.voice.name.clone()),
                ssml_gender: Some(payload.voice.ssml_gender),
                speed: Some(payload.audio_config.speaking_rate),
                pitch: Some(payload.audio_config.pitch),
            },
        }
    }
}

// ============================================================================
// 响应
// ============================================================================

/// POST /api/tts 成功响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsResponse {
    pub audio_content: String,
    #[serde(default)]
    pub message: String,
}

/// GET /api/voices 成功响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoicesResponse {
    #[serde(default)]
    pub voices: Vec<VoiceDescriptor>,
}

/// 错误响应 {"error": "..."}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::synthesis::{build, ExecutionMode, GenerationRequest};

    #[test]
    fn test_missing_settings_take_defaults() {
        let request: TtsRequest = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        let settings = request.voice_settings.into_settings();
        assert_eq!(settings.language_code, "en-US");
        assert_eq!(settings.ssml_gender, SsmlGender::Neutral);
        assert_eq!(settings.speed, Some(1.0));
        assert_eq!(settings.pitch, Some(0.0));
    }

    #[test]
    fn test_blank_gender_defaults_to_neutral() {
        let request: TtsRequest =
            serde_json::from_str(r#"{"text": "hi", "voiceSettings": {"ssmlGender": ""}}"#)
                .unwrap();
        assert_eq!(request.voice_settings.ssml_gender, None);
        assert_eq!(
            request.voice_settings.into_settings().ssml_gender,
            SsmlGender::Neutral
        );

        let request: TtsRequest =
            serde_json::from_str(r#"{"voiceSettings": {"ssmlGender": "FEMALE"}}"#).unwrap();
        assert_eq!(request.voice_settings.ssml_gender, Some(SsmlGender::Female));
    }

    #[test]
    fn test_request_from_payload_uses_wire_names() {
        let settings = SynthesisSettings {
            voice_name: "en-US-Journey-D".to_string(),
            ssml_gender: SsmlGender::Male,
            ..Default::default()
        };
        let plan = build(
            &GenerationRequest::new("Hello", settings),
            ExecutionMode::BackendProxy,
        )
        .unwrap();

        let value = serde_json::to_value(TtsRequest::from(&plan.payload)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "text": "Hello",
                "voiceSettings": {
                    "languageCode": "en-US",
                    "voiceName": "en-US-Journey-D",
                    "ssmlGender": "MALE",
                    "speed": 1.0,
                    "pitch": 0.0
                }
            })
        );
    }
}
