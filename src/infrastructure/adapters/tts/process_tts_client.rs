//! Process TTS Client - 本地引擎语音合成
//!
//! 实现 SpeechSynthesizerPort trait，调用本机合成引擎（默认 espeak-ng）。
//! 引擎将音频写入临时 WAV 文件，读回内存后删除 —— 临时文件为
//! scoped acquisition，成功与失败路径都不残留

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{AudioClip, SpeechSynthesizerPort, SynthesisError};

/// 本地引擎配置
#[derive(Debug, Clone)]
pub struct ProcessTtsClientConfig {
    /// 引擎可执行文件（espeak-ng / espeak）
    pub engine: String,
    /// 引擎音色
    pub voice: String,
    /// 语速（每分钟词数）
    pub speed_wpm: u32,
}

impl Default for ProcessTtsClientConfig {
    fn default() -> Self {
        Self {
            engine: "espeak-ng".to_string(),
            voice: "en".to_string(),
            speed_wpm: 175,
        }
    }
}

/// 本地引擎 TTS 客户端
pub struct ProcessTtsClient {
    config: ProcessTtsClientConfig,
}

impl ProcessTtsClient {
    pub fn new(config: ProcessTtsClientConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ProcessTtsClientConfig::default())
    }
}

#[async_trait]
impl SpeechSynthesizerPort for ProcessTtsClient {
    async fn synthesize(&self, text: &str) -> Result<AudioClip, SynthesisError> {
        // TempPath 负责删除，任何提前返回都会触发
        let wav_path = tempfile::Builder::new()
            .prefix("voiceread-tts-")
            .suffix(".wav")
            .tempfile()?
            .into_temp_path();

        tracing::debug!(
            engine = %self.config.engine,
            text_len = text.len(),
            output = %wav_path.display(),
            "Spawning local TTS engine"
        );

        let output = Command::new(&self.config.engine)
            .arg("-v")
            .arg(&self.config.voice)
            .arg("-s")
            .arg(self.config.speed_wpm.to_string())
            .arg("-w")
            .arg(wav_path.as_os_str())
            .arg(text)
            .output()
            .await
            .map_err(|e| {
                SynthesisError::Engine(format!(
                    "failed to spawn {}: {}",
                    self.config.engine, e
                ))
            })?;

        if !output.status.success() {
            return Err(SynthesisError::Engine(format!(
                "{} exited with {}: {}",
                self.config.engine,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let data = tokio::fs::read(&wav_path).await?;
        if data.is_empty() {
            return Err(SynthesisError::Engine(format!(
                "{} produced no audio",
                self.config.engine
            )));
        }

        tracing::debug!(audio_size = data.len(), "Local TTS synthesis completed");

        Ok(AudioClip::new(data, "audio/wav"))
    }

    async fn health_check(&self) -> bool {
        Command::new(&self.config.engine)
            .arg("--version")
            .output()
            .await
            .map(|out| out.status.success())
            .unwrap_or(false)
    }
}
