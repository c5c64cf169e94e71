//! Command Handlers

mod document_handlers;
mod reading_handlers;
mod speech_handlers;

pub use document_handlers::ExtractTextHandler;
pub use reading_handlers::{StartReadingHandler, StopReadingHandler};
pub use speech_handlers::SynthesizeBatchHandler;
