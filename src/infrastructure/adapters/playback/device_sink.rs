//! Device Audio Sink - rodio 设备播放实现
//!
//! 实现 AudioSinkPort trait。rodio 的输出流不可跨线程持有，
//! 每次播放在 spawn_blocking 中建流、解码、等待播放结束
//! （sleep_until_end 为条件等待，非忙轮询）

use async_trait::async_trait;
use std::io::Cursor;

use rodio::{Decoder, OutputStream, Sink};

use crate::application::ports::{AudioClip, AudioSinkPort, PlaybackError};

/// 设备音频输出
///
/// 进程级独占：同一时刻只有一个活动 worker 向设备写入，
/// 由 PlaybackSupervisor 的单 worker 不变量保证
#[derive(Debug, Default)]
pub struct DeviceAudioSink;

impl DeviceAudioSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioSinkPort for DeviceAudioSink {
    async fn play(&self, clip: &AudioClip) -> Result<(), PlaybackError> {
        let data = clip.data.clone();

        tokio::task::spawn_blocking(move || {
            let (_stream, handle) = OutputStream::try_default()
                .map_err(|e| PlaybackError::NoDevice(e.to_string()))?;
            let sink =
                Sink::try_new(&handle).map_err(|e| PlaybackError::Failed(e.to_string()))?;
            let source = Decoder::new(Cursor::new(data))
                .map_err(|e| PlaybackError::Decode(e.to_string()))?;

            sink.append(source);
            // 阻塞到当前片段播放完成
            sink.sleep_until_end();
            Ok(())
        })
        .await
        .map_err(|e| PlaybackError::Failed(format!("playback task panicked: {}", e)))?
    }
}
