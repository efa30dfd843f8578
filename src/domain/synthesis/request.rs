//! Synthesis Context - 生成请求

use super::{SynthesisSettings, SynthesisValidationError};

pub const MAX_TEXT_CHARS: usize = 5000;
pub const WARN_TEXT_CHARS: usize = 4500;

/// 文本长度按 UTF-16 码元计，与浏览器端 `String.length` 一致（emoji 计为 2）
pub fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// 生成请求（每次用户操作创建，不持久化）
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub text: String,
    pub settings: SynthesisSettings,
}

impl GenerationRequest {
    pub fn new(text: impl Into<String>, settings: SynthesisSettings) -> Self {
        Self {
            text: text.into(),
            settings,
        }
    }

    pub fn char_count(&self) -> usize {
        text_length(&self.text)
    }

    /// 边界处的长度检查，由调用方决定是否执行
    pub fn ensure_within(&self, max_chars: usize) -> Result<(), SynthesisValidationError> {
        let actual = self.char_count();
        if actual > max_chars {
            return Err(SynthesisValidationError::TextTooLong {
                max: max_chars,
                actual,
            });
        }
        Ok(())
    }
}

/// 文本长度统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStats {
    pub chars: usize,
    pub max: usize,
    pub near_limit: bool,
    pub over_limit: bool,
}

impl TextStats {
    pub fn measure(text: &str, warn_at: usize, max: usize) -> Self {
        let chars = text_length(text);
        Self {
            chars,
            max,
            near_limit: chars > warn_at,
            over_limit: chars > max,
        }
    }

    /// 生成按钮是否可用
    pub fn can_generate(&self) -> bool {
        self.chars > 0
    }
}

impl std::fmt::Display for TextStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.chars, self.max)
    }
}
