//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    ExtractTextHandler, StartReadingHandler, StopReadingHandler, SynthesizeBatchHandler,
    // Query handlers
    GetReadingStatusHandler, ListSessionsHandler,
    // Ports
    SessionManagerPort, SpeechSynthesizerPort, TextExtractorPort,
};
use crate::infrastructure::worker::PlaybackSupervisor;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub sessions: Arc<dyn SessionManagerPort>,
    pub extractor: Arc<dyn TextExtractorPort>,
    pub synthesizer: Arc<dyn SpeechSynthesizerPort>,
    pub supervisor: Arc<PlaybackSupervisor>,

    // ========== Command Handlers ==========
    pub extract_text_handler: ExtractTextHandler,
    pub start_reading_handler: StartReadingHandler,
    pub stop_reading_handler: StopReadingHandler,
    pub synthesize_batch_handler: SynthesizeBatchHandler,

    // ========== Query Handlers ==========
    pub reading_status_handler: GetReadingStatusHandler,
    pub list_sessions_handler: ListSessionsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        sessions: Arc<dyn SessionManagerPort>,
        extractor: Arc<dyn TextExtractorPort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        supervisor: Arc<PlaybackSupervisor>,
    ) -> Self {
        Self {
            // Ports
            sessions: sessions.clone(),
            extractor: extractor.clone(),
            synthesizer: synthesizer.clone(),
            supervisor: supervisor.clone(),

            // Command handlers
            extract_text_handler: ExtractTextHandler::new(extractor.clone()),
            start_reading_handler: StartReadingHandler::new(
                sessions.clone(),
                extractor.clone(),
                supervisor.clone(),
            ),
            stop_reading_handler: StopReadingHandler::new(sessions.clone(), supervisor.clone()),
            synthesize_batch_handler: SynthesizeBatchHandler::new(
                extractor.clone(),
                synthesizer.clone(),
            ),

            // Query handlers
            reading_status_handler: GetReadingStatusHandler::new(sessions.clone()),
            list_sessions_handler: ListSessionsHandler::new(sessions.clone()),
        }
    }
}
