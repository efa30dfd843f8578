//! Synthesis Context - 合成请求限界上下文
//!
//! 职责:
//! - 合成参数与默认值
//! - 执行模式
//! - 请求校验与提供方请求体构建

mod builder;
mod errors;
mod mode;
mod payload;
mod request;
mod settings;

pub use builder::{build, DispatchPlan};
pub use errors::SynthesisValidationError;
pub use mode::ExecutionMode;
pub use payload::{
    AudioConfig, AudioEncoding, ProviderPayload, SynthesisInput, SynthesisResponse,
    VoiceSelection,
};
pub use request::{GenerationRequest, TextStats, MAX_TEXT_CHARS, WARN_TEXT_CHARS};
pub use settings::{
    SynthesisSettings, DEFAULT_LANGUAGE, DEFAULT_PITCH, DEFAULT_SPEED, PITCH_RANGE, SPEED_RANGE,
};
