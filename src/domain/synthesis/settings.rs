//! Synthesis Context - 合成参数

use serde::{Deserialize, Serialize};

use super::SynthesisValidationError;
use crate::domain::voice::{SsmlGender, VoiceDescriptor};

pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_SPEED: f64 = 1.0;
pub const DEFAULT_PITCH: f64 = 0.0;
pub const SPEED_RANGE: (f64, f64) = (0.25, 4.0);
pub const PITCH_RANGE: (f64, f64) = (-20.0, 20.0);

/// 合成参数
///
/// 不变量:
/// - voice_name 要么为空，要么引用当前目录中支持 language_code 的音色
/// - speed/pitch 未设置时按默认值 1.0 / 0.0 参与合成，不会以空值发出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisSettings {
    pub language_code: String,
    #[serde(default)]
    pub voice_name: String,
    #[serde(default)]
    pub ssml_gender: SsmlGender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            language_code: DEFAULT_LANGUAGE.to_string(),
            voice_name: String::new(),
            ssml_gender: SsmlGender::Neutral,
            speed: Some(DEFAULT_SPEED),
            pitch: Some(DEFAULT_PITCH),
        }
    }
}

impl SynthesisSettings {
    pub fn for_language(language_code: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            ..Default::default()
        }
    }

    /// 选中音色（同步性别）
    pub fn use_voice(&mut self, voice: &VoiceDescriptor) {
        self.voice_name = voice.name.clone();
        self.ssml_gender = voice.ssml_gender;
    }

    pub fn clear_voice(&mut self) {
        self.voice_name.clear();
    }

    pub fn effective_speed(&self) -> f64 {
        self.speed.unwrap_or(DEFAULT_SPEED)
    }

    pub fn effective_pitch(&self) -> f64 {
        self.pitch.unwrap_or(DEFAULT_PITCH)
    }

    /// 校验语速与音调范围
    pub fn validate(&self) -> Result<(), SynthesisValidationError> {
        let speed = self.effective_speed();
        if !(SPEED_RANGE.0..=SPEED_RANGE.1).contains(&speed) {
            return Err(SynthesisValidationError::SpeedOutOfRange {
                min: SPEED_RANGE.0,
                max: SPEED_RANGE.1,
                actual: speed,
            });
        }
        let pitch = self.effective_pitch();
        if !(PITCH_RANGE.0..=PITCH_RANGE.1).contains(&pitch) {
            return Err(SynthesisValidationError::PitchOutOfRange {
                min: PITCH_RANGE.0,
                max: PITCH_RANGE.1,
                actual: pitch,
            });
        }
        Ok(())
    }
}
