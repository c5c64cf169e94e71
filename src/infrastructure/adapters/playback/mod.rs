//! Playback Adapters - 音频输出实现

mod device_sink;
mod discard_sink;

pub use device_sink::DeviceAudioSink;
pub use discard_sink::DiscardAudioSink;
