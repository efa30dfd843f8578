//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_store;
mod credential_store;
mod speech_endpoint;

pub use audio_store::AudioStorePort;
pub use credential_store::{ApiKey, CredentialStorePort};
pub use speech_endpoint::SpeechEndpointPort;
