//! Voice Selector - 音色排序与分类策略
//!
//! 分类与排序共用同一张有序模式表：
//! 1. 名称包含 `Journey` 的高解析度（GenAI）音色
//! 2. 名称包含 `Neural2` 的神经网络音色
//! 3. 其余为标准音色
//!
//! 排序只区分高级音色与其他音色，同级内按名称做近似区域感知的字典序比较

use std::cmp::Ordering;

use super::{VoiceCatalog, VoiceDescriptor};

/// 音色档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceTier {
    Premium,
    Neural,
    Standard,
}

impl VoiceTier {
    /// 面向用户的分类标签
    pub fn label(&self) -> &'static str {
        match self {
            Self::Premium => "High-Res (GenAI)",
            Self::Neural => "Neural2",
            Self::Standard => "Standard",
        }
    }

    pub fn is_premium(&self) -> bool {
        matches!(self, Self::Premium)
    }
}

/// 名称模式表（按优先级排列，先匹配者胜出）
const TIER_PATTERNS: &[(&str, VoiceTier)] = &[
    ("Journey", VoiceTier::Premium),
    ("Neural2", VoiceTier::Neural),
];

/// 按名称模式分类音色
pub fn classify(voice: &VoiceDescriptor) -> VoiceTier {
    TIER_PATTERNS
        .iter()
        .find(|(pattern, _)| voice.name.contains(pattern))
        .map(|(_, tier)| *tier)
        .unwrap_or(VoiceTier::Standard)
}

/// 下拉列表中展示的音色标签，例如 `en-US-Journey-D (High-Res (GenAI), MALE)`
pub fn display_label(voice: &VoiceDescriptor) -> String {
    format!(
        "{} ({}, {})",
        voice.name,
        classify(voice).label(),
        voice.ssml_gender
    )
}

/// 目录中出现的全部语言代码（去重、字典序）
pub fn languages_of(catalog: &VoiceCatalog) -> Vec<String> {
    catalog.language_codes().map(str::to_string).collect()
}

/// 指定语言的候选音色，高级音色优先，其余按名称排序
pub fn voices_for(catalog: &VoiceCatalog, language_code: &str) -> Vec<VoiceDescriptor> {
    let mut voices: Vec<VoiceDescriptor> = catalog
        .voices_in(language_code)
        .filter(|v| v.supports(language_code))
        .cloned()
        .collect();
    voices.sort_by(compare_for_selection);
    voices
}

fn compare_for_selection(a: &VoiceDescriptor, b: &VoiceDescriptor) -> Ordering {
    let a_premium = classify(a).is_premium();
    let b_premium = classify(b).is_premium();
    match (a_premium, b_premium) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => locale_compare(&a.name, &b.name),
    }
}

/// 近似区域感知的字符串比较：先忽略大小写比较，再以原始字符串打破平局
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| b.cmp(a))
}
