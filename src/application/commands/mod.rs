//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：语音合成

mod synthesis_commands;

pub mod handlers;

pub use synthesis_commands::*;
