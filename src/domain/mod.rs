//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Voice Context: 音色目录、排序与分类
//! - Synthesis Context: 合成参数、校验与请求体构建
//! - Audio Context: 生成结果与可播放资源

pub mod audio;
pub mod synthesis;
pub mod voice;
