//! Audio Context - 生成结果与可播放资源
//!
//! 职责:
//! - 可撤销的音频句柄
//! - 下载文件名策略

mod value_objects;

pub use value_objects::{download_filename, AudioHandle, GenerationResult, PlayableAudio};
