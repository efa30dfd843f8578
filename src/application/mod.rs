//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechEndpoint、CredentialStore、AudioStore）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - router: 执行模式分发
//! - audio_result / lifecycle / session: 生成结果、状态机与会话上下文
//! - error: 应用层错误定义

pub mod audio_result;
pub mod commands;
pub mod error;
pub mod lifecycle;
pub mod ports;
pub mod queries;
pub mod router;
pub mod session;

// Re-exports
pub use audio_result::AudioResultHandler;
pub use commands::{
    handlers::{SynthesizeSpeechHandler, SynthesizedSpeech},
    SynthesizeSpeech,
};
pub use error::SpeechError;
pub use lifecycle::{GenerationLifecycle, LifecycleStatus, Notification, NotificationLevel};
pub use ports::{ApiKey, AudioStorePort, CredentialStorePort, SpeechEndpointPort};
pub use queries::{handlers::FetchVoicesHandler, FetchVoices};
pub use router::ExecutionModeRouter;
pub use session::{CatalogState, SpeechSession, TextLimits, SAMPLE_TEXT};
