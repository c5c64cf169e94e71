//! Discard Audio Sink - 无声播放实现
//!
//! 丢弃音频片段，按片段时长（未知则按固定值）模拟播放耗时。
//! 用于无音频设备的部署与测试

use async_trait::async_trait;
use std::time::Duration;

use crate::application::ports::{AudioClip, AudioSinkPort, PlaybackError};

/// 无声音频输出
#[derive(Debug, Clone)]
pub struct DiscardAudioSink {
    /// 片段未携带时长时模拟的播放时长（毫秒）
    pub default_duration_ms: u64,
}

impl DiscardAudioSink {
    pub fn new(default_duration_ms: u64) -> Self {
        Self {
            default_duration_ms,
        }
    }
}

impl Default for DiscardAudioSink {
    fn default() -> Self {
        Self::new(50)
    }
}

#[async_trait]
impl AudioSinkPort for DiscardAudioSink {
    async fn play(&self, clip: &AudioClip) -> Result<(), PlaybackError> {
        let duration_ms = clip.duration_ms.unwrap_or(self.default_duration_ms);
        tracing::debug!(
            audio_size = clip.data.len(),
            duration_ms = duration_ms,
            "DiscardAudioSink: dropping clip"
        );
        tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        Ok(())
    }
}
