//! Voice Context - 音色目录限界上下文
//!
//! 职责:
//! - 音色描述（提供方返回的只读数据）
//! - 按语言建立索引的目录
//! - 候选音色排序与分类策略

mod catalog;
mod selector;
mod value_objects;

pub use catalog::VoiceCatalog;
pub use selector::{
    classify, display_label, languages_of, locale_compare, voices_for, VoiceTier,
};
pub use value_objects::{SsmlGender, VoiceDescriptor};
