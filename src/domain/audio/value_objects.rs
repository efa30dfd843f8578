//! Audio Context - Value Objects

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::synthesis::AudioEncoding;

/// 可撤销的音频引用，渲染为 `blob:voxora/<uuid>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioHandle(Uuid);

impl AudioHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uri(&self) -> String {
        format!("blob:voxora/{}", self.0)
    }
}

impl Default for AudioHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AudioHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri())
    }
}

/// 可播放、可下载的音频资源
#[derive(Debug, Clone)]
pub struct PlayableAudio {
    pub handle: AudioHandle,
    pub bytes: Arc<[u8]>,
    pub encoding: AudioEncoding,
    pub filename: String,
}

impl PlayableAudio {
    pub fn mime_type(&self) -> &'static str {
        self.encoding.mime_type()
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// 一次成功生成的结果
///
/// 生命周期: 直到被下一次成功生成取代或会话结束；被取代时必须释放其句柄
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub audio: PlayableAudio,
    pub voice_name: String,
    pub generated_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn audio_bytes(&self) -> &[u8] {
        &self.audio.bytes
    }
}

/// 下载文件名：`tts_<YYYYMMDDTHHMMSS>_<voice>.mp3`（UTC，精确到秒）
pub fn download_filename(
    generated_at: DateTime<Utc>,
    voice_name: &str,
    encoding: AudioEncoding,
) -> String {
    format!(
        "tts_{}_{}.{}",
        generated_at.format("%Y%m%dT%H%M%S"),
        voice_name,
        encoding.extension()
    )
}
