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

use super::types::{AppConfig, TtsBackend};

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

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOICEREAD_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOICEREAD_SERVER__PORT=8080`
/// - `VOICEREAD_TTS__BACKEND=local`
/// - `VOICEREAD_TTS__REMOTE__URL=http://tts-server:8000`
/// - `VOICEREAD_TTS__RETRY__PRESET=quick`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5080)?
        .set_default("server.max_upload_size", 10 * 1024 * 1024)?
        .set_default("tts.backend", "remote")?
        .set_default("tts.language", "en")?
        .set_default("tts.remote.url", "http://localhost:8000")?
        .set_default("tts.remote.timeout_secs", 120)?
        .set_default("tts.local.engine", "espeak-ng")?
        .set_default("tts.local.voice", "en")?
        .set_default("tts.local.speed_wpm", 175)?
        .set_default("tts.retry.preset", "strict")?
        .set_default("playback.backend", "device")?
        .set_default("playback.discard_clip_ms", 50)?
        .set_default("gc.enabled", true)?
        .set_default("gc.interval_secs", 600)?
        .set_default("gc.session_expire_secs", 3600)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: VOICEREAD_
    // 层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("VOICEREAD")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.server.max_upload_size == 0 {
        return Err(ConfigError::ValidationError(
            "Max upload size cannot be 0".to_string(),
        ));
    }

    if config.tts.backend == TtsBackend::Remote && config.tts.remote.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Remote TTS URL cannot be empty".to_string(),
        ));
    }

    if config.tts.backend == TtsBackend::Local && config.tts.local.engine.is_empty() {
        return Err(ConfigError::ValidationError(
            "Local TTS engine cannot be empty".to_string(),
        ));
    }

    if config.tts.retry.max_attempts == Some(0) {
        return Err(ConfigError::ValidationError(
            "Retry max_attempts cannot be 0".to_string(),
        ));
    }

    if config.gc.enabled && config.gc.interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "GC interval cannot be 0 when GC is enabled".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Max Upload Size: {} bytes", config.server.max_upload_size);
    tracing::info!("TTS Backend: {:?}", config.tts.backend);
    tracing::info!("TTS Language: {}", config.tts.language);
    match config.tts.backend {
        TtsBackend::Remote => {
            tracing::info!("TTS URL: {}", config.tts.remote.url);
            tracing::info!("TTS Timeout: {}s", config.tts.remote.timeout_secs);
        }
        TtsBackend::Local => {
            tracing::info!("TTS Engine: {}", config.tts.local.engine);
            tracing::info!("TTS Voice: {}", config.tts.local.voice);
        }
        TtsBackend::Fake => {}
    }
    let retry = config.tts.retry.policy();
    tracing::info!(
        "TTS Retry: {} attempts, {:?} initial backoff",
        retry.max_attempts,
        retry.initial_backoff
    );
    tracing::info!("Playback Backend: {:?}", config.playback.backend);
    tracing::info!("GC Enabled: {}", config.gc.enabled);
    if config.gc.enabled {
        tracing::info!("GC Interval: {}s", config.gc.interval_secs);
        tracing::info!("Session Expire: {}s", config.gc.session_expire_secs);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
