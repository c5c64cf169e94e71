//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TextExtractor、SpeechSynthesizer、AudioSink、SessionManager）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Commands
    ExtractText,
    ExtractTextResult,
    StartReading,
    StartReadingResult,
    StopReading,
    StopReadingResult,
    SynthesizeBatch,
    SynthesizeBatchResult,
    // Handlers
    handlers::{ExtractTextHandler, StartReadingHandler, StopReadingHandler, SynthesizeBatchHandler},
};

pub use error::ApplicationError;

pub use ports::{
    // Audio sink
    AudioSinkPort,
    PlaybackError,
    // Session manager
    SessionError,
    SessionManagerPort,
    // Speech synthesizer
    AudioClip,
    SpeechSynthesizerPort,
    SynthesisError,
    // Text extractor
    ExtractError,
    ExtractedText,
    TextExtractorPort,
};

pub use queries::{
    GetReadingStatus,
    ListSessions,
    ReadingStatusResult,
    SessionSummary,
    handlers::{GetReadingStatusHandler, ListSessionsHandler},
};
