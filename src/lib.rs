//! Voxora - 文本转语音编排核心
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色目录、排序与分级
//! - Synthesis Context: 合成参数、执行模式、请求体构建
//! - Audio Context: 生成结果与下载文件名
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SpeechEndpoint, CredentialStore, AudioStore）
//! - Commands / Queries: 合成命令与音色查询
//! - ExecutionModeRouter, AudioResultHandler, GenerationLifecycle, SpeechSession
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: Google TTS 客户端、本地代理客户端、Fake 端点
//! - Memory: 音频句柄注册表、静态凭证
//! - HTTP: 本地代理服务器

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{SpeechError, SpeechSession};
pub use config::{load_config, AppConfig};
