//! Speech Synthesizer Port - 语音合成抽象
//!
//! 远程 HTTP 服务与本地引擎两种实现共用同一能力接口，
//! 消费方对两者不做区分

use async_trait::async_trait;
use thiserror::Error;

/// 合成错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// 服务限流（HTTP 429 等价信号），可重试
    #[error("Synthesis rate limited: {0}")]
    RateLimited(String),

    /// 不可重试的合成失败
    #[error("Synthesis failed: {0}")]
    Failure(String),

    /// 本地引擎启动或退出异常
    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl SynthesisError {
    /// 是否为限流信号
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SynthesisError::RateLimited(_))
    }
}

impl From<std::io::Error> for SynthesisError {
    fn from(err: std::io::Error) -> Self {
        SynthesisError::Io(err.to_string())
    }
}

/// 音频片段
///
/// 编码后的不透明音频字节，仅存于内存，不落盘
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub data: Vec<u8>,
    /// MIME 类型（audio/wav、audio/mpeg 等）
    pub media_type: String,
    /// 音频时长（毫秒），实现可选提供
    pub duration_ms: Option<u64>,
}

impl AudioClip {
    pub fn new(data: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            data,
            media_type: media_type.into(),
            duration_ms: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Speech Synthesizer Port
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// 将文本合成为音频
    async fn synthesize(&self, text: &str) -> Result<AudioClip, SynthesisError>;

    /// 检查合成后端是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
