//! Memory Layer - In-Memory State Management
//!
//! 实现 AudioStore 与 CredentialStore，管理可播放音频句柄与客户端凭证

mod audio_store;
mod credential_store;

pub use audio_store::InMemoryAudioStore;
pub use credential_store::StaticCredentialStore;
