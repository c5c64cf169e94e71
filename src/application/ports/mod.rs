//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_sink;
mod session_manager;
mod speech_synthesizer;
mod text_extractor;

pub use audio_sink::{AudioSinkPort, PlaybackError};
pub use session_manager::{SessionError, SessionManagerPort};
pub use speech_synthesizer::{AudioClip, SpeechSynthesizerPort, SynthesisError};
pub use text_extractor::{ExtractError, ExtractedText, TextExtractorPort};
