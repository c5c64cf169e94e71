//! Audio Sink Port - 音频输出抽象
//!
//! 进程级独占的音频输出设备。play 在播放完成后才返回
//! （条件等待，非忙轮询），队列消费方依赖这一点保证
//! 句子播放严格有序且互不重叠

use async_trait::async_trait;
use thiserror::Error;

use super::speech_synthesizer::AudioClip;

/// 播放错误（不重试）
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("No audio output device: {0}")]
    NoDevice(String),

    #[error("Cannot decode audio clip: {0}")]
    Decode(String),

    #[error("Playback failed: {0}")]
    Failed(String),
}

/// Audio Sink Port
#[async_trait]
pub trait AudioSinkPort: Send + Sync {
    /// 播放一个音频片段，阻塞到播放完成
    async fn play(&self, clip: &AudioClip) -> Result<(), PlaybackError>;
}
