//! Application Commands - CQRS 命令

pub mod handlers;
mod reading_commands;

pub use reading_commands::{
    ExtractText, ExtractTextResult, StartReading, StartReadingResult, StopReading,
    StopReadingResult, SynthesizeBatch, SynthesizeBatchResult,
};
