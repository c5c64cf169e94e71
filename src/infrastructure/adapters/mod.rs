//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod extractor;
pub mod playback;
pub mod storage;
pub mod tts;

pub use extractor::PdfTextExtractor;
pub use playback::{DeviceAudioSink, DiscardAudioSink};
pub use storage::TempDocument;
pub use tts::{
    FakeTtsClient, FakeTtsClientConfig, HttpTtsClient, HttpTtsClientConfig, ProcessTtsClient,
    ProcessTtsClientConfig, RetryMode, RetryPolicy,
};
