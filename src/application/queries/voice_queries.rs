//! Voice Queries

/// 拉取当前凭证/模式下的音色目录
#[derive(Debug, Clone, Default)]
pub struct FetchVoices;
