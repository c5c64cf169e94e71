//! TTS Adapters - 语音合成实现
//!
//! 远程 HTTP 服务、本地引擎、测试用 Fake 三种实现，
//! 均通过 SpeechSynthesizerPort 接入

mod fake_tts_client;
mod http_tts_client;
mod process_tts_client;
mod retry;

pub use fake_tts_client::{FakeTtsClient, FakeTtsClientConfig};
pub use http_tts_client::{HttpTtsClient, HttpTtsClientConfig};
pub use process_tts_client::{ProcessTtsClient, ProcessTtsClientConfig};
pub use retry::{run_with_retry, RetryMode, RetryPolicy};
