//! Voice Catalog - 按语言索引的音色目录

use std::collections::BTreeMap;

use super::VoiceDescriptor;

/// 音色目录
///
/// 不变量:
/// - 索引中的每一项都指向 `voices` 中的某个位置
/// - 每次拉取整体重建，不做增量更新
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceCatalog {
    voices: Vec<VoiceDescriptor>,
    by_language: BTreeMap<String, Vec<usize>>,
}

impl VoiceCatalog {
    /// 由提供方返回的原始列表构建目录
    pub fn from_voices(voices: Vec<VoiceDescriptor>) -> Self {
        let mut by_language: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, voice) in voices.iter().enumerate() {
            for code in &voice.language_codes {
                let entry = by_language.entry(code.clone()).or_default();
                if !entry.contains(&idx) {
                    entry.push(idx);
                }
            }
        }
        Self {
            voices,
            by_language,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    /// 原始顺序的全部音色
    pub fn voices(&self) -> &[VoiceDescriptor] {
        &self.voices
    }

    /// 按字典序排列的语言代码
    pub fn language_codes(&self) -> impl Iterator<Item = &str> {
        self.by_language.keys().map(String::as_str)
    }

    /// 支持指定语言的音色（原始顺序）
    pub fn voices_in(&self, language_code: &str) -> impl Iterator<Item = &VoiceDescriptor> {
        self.by_language
            .get(language_code)
            .into_iter()
            .flatten()
            .map(|&idx| &self.voices[idx])
    }
}
