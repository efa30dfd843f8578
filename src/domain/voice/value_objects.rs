//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

/// SSML 声音性别
///
/// 与提供方的 `ssmlGender` 字段一一对应，未知取值统一归为 `Unspecified`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SsmlGender {
    Male,
    Female,
    #[default]
    Neutral,
    #[serde(rename = "SSML_VOICE_GENDER_UNSPECIFIED")]
    #[serde(other)]
    Unspecified,
}

impl SsmlGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Neutral => "NEUTRAL",
            Self::Unspecified => "SSML_VOICE_GENDER_UNSPECIFIED",
        }
    }
}

impl std::fmt::Display for SsmlGender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 音色描述
///
/// 不变量:
/// - name 在提供方范围内唯一
/// - 拉取后不可变，由 VoiceCatalog 持有
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDescriptor {
    pub name: String,
    #[serde(default)]
    pub language_codes: Vec<String>,
    #[serde(default)]
    pub ssml_gender: SsmlGender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natural_sample_rate_hertz: Option<u32>,
}

impl VoiceDescriptor {
    pub fn new(
        name: impl Into<String>,
        language_codes: impl IntoIterator<Item = impl Into<String>>,
        ssml_gender: SsmlGender,
    ) -> Self {
        Self {
            name: name.into(),
            language_codes: language_codes.into_iter().map(Into::into).collect(),
            ssml_gender,
            natural_sample_rate_hertz: None,
        }
    }

    /// 是否支持指定语言
    pub fn supports(&self, language_code: &str) -> bool {
        self.language_codes.iter().any(|c| c == language_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_from_provider_json() {
        let json = r#"{
            "name": "en-US-Journey-D",
            "languageCodes": ["en-US"],
            "ssmlGender": "MALE",
            "naturalSampleRateHertz": 24000
        }"#;
        let voice: VoiceDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(voice.name, "en-US-Journey-D");
        assert_eq!(voice.ssml_gender, SsmlGender::Male);
        assert_eq!(voice.natural_sample_rate_hertz, Some(24000));
        assert!(voice.supports("en-US"));
        assert!(!voice.supports("en-GB"));
    }

    #[test]
    fn test_unknown_gender_is_unspecified() {
        let json = r#"{"name": "x", "languageCodes": [], "ssmlGender": "SOMETHING_NEW"}"#;
        let voice: VoiceDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(voice.ssml_gender, SsmlGender::Unspecified);
    }

    #[test]
    fn test_gender_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&SsmlGender::Female).unwrap(), "\"FEMALE\"");
        assert_eq!(SsmlGender::Neutral.to_string(), "NEUTRAL");
    }
}
