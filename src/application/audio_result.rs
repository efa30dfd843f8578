//! Audio Result Handler - 解码音频并生成可播放资源
//!
//! base64 → 原始字节 → 注册为可撤销句柄；同一句柄既用于播放也用于下载

use base64::{engine::general_purpose, Engine};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::error::SpeechError;
use super::ports::AudioStorePort;
use crate::domain::audio::{download_filename, AudioHandle, PlayableAudio};
use crate::domain::synthesis::AudioEncoding;

pub struct AudioResultHandler {
    store: Arc<dyn AudioStorePort>,
}

impl AudioResultHandler {
    pub fn new(store: Arc<dyn AudioStorePort>) -> Self {
        Self { store }
    }

    /// 解码并注册音频
    pub fn materialize(
        &self,
        audio_content: &str,
        voice_name: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<PlayableAudio, SpeechError> {
        let bytes = general_purpose::STANDARD
            .decode(audio_content)
            .map_err(|e| SpeechError::Decode(e.to_string()))?;
        let bytes: Arc<[u8]> = Arc::from(bytes);
        let handle = self.store.register(bytes.clone());

        tracing::debug!(
            handle = %handle,
            audio_size = bytes.len(),
            "Audio materialized"
        );

        Ok(PlayableAudio {
            handle,
            bytes,
            encoding: AudioEncoding::Mp3,
            filename: download_filename(generated_at, voice_name, AudioEncoding::Mp3),
        })
    }

    /// 释放被取代的资源
    pub fn release(&self, audio: &PlayableAudio) -> bool {
        let released = self.store.revoke(&audio.handle);
        if released {
            tracing::debug!(handle = %audio.handle, "Audio released");
        }
        released
    }

    /// 通过句柄取回音频（播放/下载）
    pub fn resolve(&self, handle: &AudioHandle) -> Option<Arc<[u8]>> {
        self.store.resolve(handle)
    }

    pub fn live_resources(&self) -> usize {
        self.store.live_count()
    }
}
