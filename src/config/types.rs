//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::synthesis::{ExecutionMode, DEFAULT_LANGUAGE, MAX_TEXT_CHARS, WARN_TEXT_CHARS};
use crate::infrastructure::adapters::{DEFAULT_PROVIDER_URL, DEFAULT_PROXY_URL};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 代理服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 语音提供方配置（代理侧）
    #[serde(default)]
    pub provider: ProviderConfig,

    /// 客户端配置（say / voices 命令）
    #[serde(default)]
    pub client: ClientConfig,

    /// 文本长度限制
    #[serde(default)]
    pub limits: LimitsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default)]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,

    /// URL 路径前缀（"/" 表示根路径托管）
    #[serde(default = "default_static_path")]
    pub path: String,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_static_path() -> String {
    "/".to_string()
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_static_dir(),
            path: default_static_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// 语音提供方配置
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// 提供方基础 URL
    #[serde(default = "default_provider_url")]
    pub base_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// 服务端密钥；未设置时回退到 GOOGLE_API_KEY 环境变量
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_provider_url() -> String {
    DEFAULT_PROVIDER_URL.to_string()
}

fn default_timeout() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_url(),
            timeout_secs: default_timeout(),
            api_key: None,
        }
    }
}

/// 客户端配置
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// 执行模式: direct | proxy
    #[serde(default)]
    pub mode: ExecutionMode,

    /// 客户端持有的密钥（DirectClient 模式）
    #[serde(default)]
    pub api_key: Option<String>,

    /// 本地代理地址（BackendProxy 模式）
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,

    /// 初始语言
    #[serde(default = "default_language")]
    pub language: String,

    /// 音频输出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_proxy_url() -> String {
    DEFAULT_PROXY_URL.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::default(),
            api_key: None,
            proxy_url: default_proxy_url(),
            language: default_language(),
            output_dir: default_output_dir(),
        }
    }
}

/// 文本长度限制
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,

    #[serde(default = "default_warn_text_chars")]
    pub warn_text_chars: usize,

    /// 代理是否拒绝超长文本
    #[serde(default = "default_enforce_on_proxy")]
    pub enforce_on_proxy: bool,
}

fn default_max_text_chars() -> usize {
    MAX_TEXT_CHARS
}

fn default_warn_text_chars() -> usize {
    WARN_TEXT_CHARS
}

fn default_enforce_on_proxy() -> bool {
    true
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_text_chars: default_max_text_chars(),
            warn_text_chars: default_warn_text_chars(),
            enforce_on_proxy: default_enforce_on_proxy(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
