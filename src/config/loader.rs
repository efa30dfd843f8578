//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::domain::synthesis::{MAX_TEXT_CHARS, WARN_TEXT_CHARS};
use crate::infrastructure::adapters::{DEFAULT_PROVIDER_URL, DEFAULT_PROXY_URL};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 服务端密钥的兜底环境变量
pub const PROVIDER_KEY_ENV: &str = "GOOGLE_API_KEY";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOXORA_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOXORA_SERVER__PORT=3000`
/// - `VOXORA_CLIENT__MODE=proxy`
/// - `VOXORA_PROVIDER__API_KEY=...`（未设置时读取 `GOOGLE_API_KEY`）
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("provider.base_url", DEFAULT_PROVIDER_URL)?
        .set_default("provider.timeout_secs", 60)?
        .set_default("client.mode", "direct")?
        .set_default("client.proxy_url", DEFAULT_PROXY_URL)?
        .set_default("client.language", "en-US")?
        .set_default("client.output_dir", ".")?
        .set_default("limits.max_text_chars", MAX_TEXT_CHARS as u64)?
        .set_default("limits.warn_text_chars", WARN_TEXT_CHARS as u64)?
        .set_default("limits.enforce_on_proxy", true)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），例如 VOXORA_CLIENT__MODE=proxy
    builder = builder.add_source(
        Environment::with_prefix("VOXORA")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    app_config.provider.api_key = resolve_provider_key(
        app_config.provider.api_key.take(),
        std::env::var(PROVIDER_KEY_ENV).ok(),
    );

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 配置中的密钥优先，其次是 GOOGLE_API_KEY；空白值视为未设置
fn resolve_provider_key(configured: Option<String>, env: Option<String>) -> Option<String> {
    configured
        .filter(|k| !k.trim().is_empty())
        .or_else(|| env.filter(|k| !k.trim().is_empty()))
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.provider.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Provider URL cannot be empty".to_string(),
        ));
    }

    if config.client.proxy_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Proxy URL cannot be empty".to_string(),
        ));
    }

    if config.limits.warn_text_chars > config.limits.max_text_chars {
        return Err(ConfigError::ValidationError(format!(
            "warn_text_chars ({}) cannot exceed max_text_chars ({})",
            config.limits.warn_text_chars, config.limits.max_text_chars
        )));
    }

    Ok(())
}

fn redact(key: &Option<String>) -> &'static str {
    if key.is_some() {
        "<set>"
    } else {
        "<unset>"
    }
}

/// 打印配置信息（用于启动时日志），密钥不输出
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    if config.server.static_files.enabled {
        tracing::info!(
            "Static Files: {:?} at {}",
            config.server.static_files.dir,
            config.server.static_files.path
        );
    }
    tracing::info!("Provider URL: {}", config.provider.base_url);
    tracing::info!("Provider Timeout: {}s", config.provider.timeout_secs);
    tracing::info!("Provider API Key: {}", redact(&config.provider.api_key));
    tracing::info!("Client Mode: {}", config.client.mode);
    tracing::info!("Client API Key: {}", redact(&config.client.api_key));
    tracing::info!("Proxy URL: {}", config.client.proxy_url);
    tracing::info!(
        "Text Limits: warn > {}, max {} (enforced on proxy: {})",
        config.limits.warn_text_chars,
        config.limits.max_text_chars,
        config.limits.enforce_on_proxy
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
