//! Fake TTS Client - 用于测试与无音频环境的 TTS 客户端
//!
//! 始终返回固定的音频字节，不调用任何合成服务

use async_trait::async_trait;
use std::time::Duration;

use crate::application::ports::{AudioClip, SpeechSynthesizerPort, SynthesisError};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 固定返回的音频字节
    pub audio_data: Vec<u8>,
    /// 模拟的合成延迟（毫秒）
    pub delay_ms: u64,
    /// 固定返回的音频时长（毫秒）
    pub duration_ms: u64,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            audio_data: b"RIFF-fake-wav".to_vec(),
            delay_ms: 20,
            duration_ms: 1000,
        }
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        tracing::info!(
            audio_size = config.audio_data.len(),
            delay_ms = config.delay_ms,
            "FakeTtsClient initialized"
        );
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }
}

#[async_trait]
impl SpeechSynthesizerPort for FakeTtsClient {
    async fn synthesize(&self, text: &str) -> Result<AudioClip, SynthesisError> {
        tracing::debug!(text_len = text.len(), "FakeTtsClient: returning fixed audio");

        // 模拟合成耗时
        tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;

        Ok(AudioClip {
            data: self.config.audio_data.clone(),
            media_type: "audio/wav".to_string(),
            duration_ms: Some(self.config.duration_ms),
        })
    }

    async fn health_check(&self) -> bool {
        true
    }
}
