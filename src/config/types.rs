//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::infrastructure::adapters::RetryPolicy;

/// 应用主配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 合成配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 播放输出配置
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// 会话 GC 配置
    #[serde(default)]
    pub gc: GcConfig,

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

    /// 上传文件最大大小（字节），默认 10MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5080
}

fn default_max_upload_size() -> u64 {
    10 * 1024 * 1024 // 10 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 合成后端选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsBackend {
    /// 远程 HTTP TTS 服务
    Remote,
    /// 本地合成引擎（espeak-ng 等）
    Local,
    /// 固定音频（测试 / 无音频环境）
    Fake,
}

impl Default for TtsBackend {
    fn default() -> Self {
        TtsBackend::Remote
    }
}

/// TTS 合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 后端选择
    #[serde(default)]
    pub backend: TtsBackend,

    /// 合成语言
    #[serde(default = "default_language")]
    pub language: String,

    /// 远程服务配置
    #[serde(default)]
    pub remote: RemoteTtsConfig,

    /// 本地引擎配置
    #[serde(default)]
    pub local: LocalTtsConfig,

    /// 限流重试配置
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            backend: TtsBackend::default(),
            language: default_language(),
            remote: RemoteTtsConfig::default(),
            local: LocalTtsConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

/// 远程 TTS 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteTtsConfig {
    /// TTS 服务基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,
}

fn default_tts_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

impl Default for RemoteTtsConfig {
    fn default() -> Self {
        Self {
            url: default_tts_url(),
            timeout_secs: default_tts_timeout(),
        }
    }
}

/// 本地引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct LocalTtsConfig {
    /// 引擎可执行文件
    #[serde(default = "default_engine")]
    pub engine: String,

    /// 引擎音色
    #[serde(default = "default_voice")]
    pub voice: String,

    /// 语速（每分钟词数）
    #[serde(default = "default_speed_wpm")]
    pub speed_wpm: u32,
}

fn default_engine() -> String {
    "espeak-ng".to_string()
}

fn default_voice() -> String {
    "en".to_string()
}

fn default_speed_wpm() -> u32 {
    175
}

impl Default for LocalTtsConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            voice: default_voice(),
            speed_wpm: default_speed_wpm(),
        }
    }
}

/// 限流重试预设
///
/// 两个预设来自不同的服务配额策略，按配置选择，不做合并
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetryPreset {
    /// 3 次尝试，2s 起步，任何错误都重试
    Quick,
    /// 5 次尝试，5s 起步，仅限流重试
    Strict,
}

impl Default for RetryPreset {
    fn default() -> Self {
        RetryPreset::Strict
    }
}

/// 限流重试配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RetryConfig {
    /// 预设选择
    #[serde(default)]
    pub preset: RetryPreset,

    /// 覆盖预设的总尝试次数
    #[serde(default)]
    pub max_attempts: Option<u32>,

    /// 覆盖预设的首次退避时长（秒）
    #[serde(default)]
    pub initial_backoff_secs: Option<u64>,
}

impl RetryConfig {
    /// 生成重试策略：预设打底，显式字段覆盖
    pub fn policy(&self) -> RetryPolicy {
        let mut policy = match self.preset {
            RetryPreset::Quick => RetryPolicy::quick(),
            RetryPreset::Strict => RetryPolicy::strict(),
        };
        if let Some(max_attempts) = self.max_attempts {
            policy.max_attempts = max_attempts;
        }
        if let Some(secs) = self.initial_backoff_secs {
            policy.initial_backoff = std::time::Duration::from_secs(secs);
        }
        policy
    }
}

/// 播放后端选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackBackend {
    /// 本机音频设备
    Device,
    /// 丢弃音频（无设备环境）
    Discard,
}

impl Default for PlaybackBackend {
    fn default() -> Self {
        PlaybackBackend::Device
    }
}

/// 播放输出配置
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackConfig {
    /// 后端选择
    #[serde(default)]
    pub backend: PlaybackBackend,

    /// discard 后端模拟的片段时长（毫秒）
    #[serde(default = "default_discard_clip_ms")]
    pub discard_clip_ms: u64,
}

fn default_discard_clip_ms() -> u64 {
    50
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            backend: PlaybackBackend::default(),
            discard_clip_ms: default_discard_clip_ms(),
        }
    }
}

/// GC（过期会话清理）配置
#[derive(Debug, Clone, Deserialize)]
pub struct GcConfig {
    /// 是否启用自动 GC
    #[serde(default = "default_gc_enabled")]
    pub enabled: bool,

    /// GC 间隔时间（秒）
    #[serde(default = "default_gc_interval")]
    pub interval_secs: u64,

    /// Session 过期时间（秒）
    #[serde(default = "default_session_expire")]
    pub session_expire_secs: u64,
}

fn default_gc_enabled() -> bool {
    true
}

fn default_gc_interval() -> u64 {
    600 // 10 分钟
}

fn default_session_expire() -> u64 {
    3600 // 1 小时
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            enabled: default_gc_enabled(),
            interval_secs: default_gc_interval(),
            session_expire_secs: default_session_expire(),
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
