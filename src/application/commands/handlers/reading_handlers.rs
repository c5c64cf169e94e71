//! Reading Command Handlers - 朗读启动 / 停止

use std::sync::Arc;

use crate::application::commands::handlers::document_handlers::stage_and_extract;
use crate::application::commands::reading_commands::{
    StartReading, StartReadingResult, StopReading, StopReadingResult,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{SessionManagerPort, TextExtractorPort};
use crate::domain::{split_sentences, ReadingSession, ReadingState};
use crate::infrastructure::worker::PlaybackSupervisor;

/// StartReading Handler - 提取、分句、入队
///
/// 会话沿 Idle -> Extracting -> Queued 推进；Playing 由 worker
/// 在首句开始时设置。已有朗读在进行时由 Supervisor 先排空旧 worker
pub struct StartReadingHandler {
    sessions: Arc<dyn SessionManagerPort>,
    extractor: Arc<dyn TextExtractorPort>,
    supervisor: Arc<PlaybackSupervisor>,
}

impl StartReadingHandler {
    pub fn new(
        sessions: Arc<dyn SessionManagerPort>,
        extractor: Arc<dyn TextExtractorPort>,
        supervisor: Arc<PlaybackSupervisor>,
    ) -> Self {
        Self {
            sessions,
            extractor,
            supervisor,
        }
    }

    pub async fn handle(&self, cmd: StartReading) -> Result<StartReadingResult, ApplicationError> {
        let session_id = self.sessions.create(ReadingSession::new())?;
        self.sessions
            .set_state(&session_id, ReadingState::Extracting)?;

        // 提取失败中止整个操作：无文本，不尝试任何合成
        let extracted = match stage_and_extract(
            self.extractor.as_ref(),
            &cmd.data,
            cmd.start_page,
            cmd.end_page,
        ) {
            Ok(extracted) => extracted,
            Err(e) => {
                let _ = self.sessions.close(&session_id);
                return Err(e);
            }
        };

        let sentences = split_sentences(&extracted.text);
        if sentences.is_empty() {
            let _ = self.sessions.close(&session_id);
            return Err(ApplicationError::validation(
                "No readable sentences in the selected pages",
            ));
        }

        let total_sentences = sentences.len();
        self.sessions.set_total(&session_id, total_sentences)?;
        self.sessions.set_state(&session_id, ReadingState::Queued)?;

        self.supervisor.begin(&session_id, sentences).await;

        tracing::info!(
            session_id = %session_id,
            total_sentences = total_sentences,
            range = %extracted.range,
            "Reading session started"
        );

        Ok(StartReadingResult {
            session_id,
            total_sentences,
            text: extracted.text,
            total_pages: extracted.total_pages,
        })
    }
}

/// StopReading Handler - 协作式停止
///
/// 写入终止哨兵并等待 worker 退出；不中断正在播放的片段
pub struct StopReadingHandler {
    sessions: Arc<dyn SessionManagerPort>,
    supervisor: Arc<PlaybackSupervisor>,
}

impl StopReadingHandler {
    pub fn new(
        sessions: Arc<dyn SessionManagerPort>,
        supervisor: Arc<PlaybackSupervisor>,
    ) -> Self {
        Self {
            sessions,
            supervisor,
        }
    }

    pub async fn handle(&self, cmd: StopReading) -> Result<StopReadingResult, ApplicationError> {
        // 校验会话存在
        self.sessions.get(&cmd.session_id)?;

        let drained = self.supervisor.stop_session(&cmd.session_id).await;

        tracing::info!(
            session_id = %cmd.session_id,
            drained = drained,
            "Reading session stopped"
        );

        Ok(StopReadingResult {
            session_id: cmd.session_id,
            drained,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        AudioSinkPort, ExtractError, ExtractedText, SpeechSynthesizerPort,
    };
    use crate::domain::PageRange;
    use crate::infrastructure::adapters::{
        DiscardAudioSink, FakeTtsClient, FakeTtsClientConfig,
    };
    use crate::infrastructure::memory::InMemorySessionManager;

    /// 固定文本提取器
    struct FixedTextExtractor {
        text: String,
    }

    impl TextExtractorPort for FixedTextExtractor {
        fn page_count(&self, _path: &std::path::Path) -> Result<u32, ExtractError> {
            Ok(1)
        }

        fn extract(
            &self,
            _path: &std::path::Path,
            range: PageRange,
        ) -> Result<ExtractedText, ExtractError> {
            Ok(ExtractedText {
                text: self.text.clone(),
                total_pages: 1,
                range: range.clamp_to(1),
            })
        }
    }

    struct Pipeline {
        sessions: Arc<InMemorySessionManager>,
        supervisor: Arc<PlaybackSupervisor>,
        start: StartReadingHandler,
        stop: StopReadingHandler,
    }

    fn pipeline(text: &str) -> Pipeline {
        let sessions = Arc::new(InMemorySessionManager::new());
        let extractor = Arc::new(FixedTextExtractor {
            text: text.to_string(),
        });
        let synthesizer: Arc<dyn SpeechSynthesizerPort> =
            Arc::new(FakeTtsClient::new(FakeTtsClientConfig {
                delay_ms: 0,
                ..Default::default()
            }));
        let sink: Arc<dyn AudioSinkPort> = Arc::new(DiscardAudioSink::new(1));
        let supervisor = Arc::new(PlaybackSupervisor::new(
            synthesizer,
            sink,
            sessions.clone(),
        ));

        Pipeline {
            sessions: sessions.clone(),
            supervisor: supervisor.clone(),
            start: StartReadingHandler::new(sessions.clone(), extractor, supervisor.clone()),
            stop: StopReadingHandler::new(sessions, supervisor),
        }
    }

    fn start_cmd() -> StartReading {
        StartReading {
            data: b"pdf".to_vec(),
            start_page: 1,
            end_page: None,
        }
    }

    #[tokio::test]
    async fn test_start_splits_and_queues_sentences() {
        let p = pipeline("Hello world. This is VoiceRead. Testing.");

        let result = p.start.handle(start_cmd()).await.unwrap();
        assert_eq!(result.total_sentences, 3);
        assert_eq!(
            p.supervisor.active_session().await,
            Some(result.session_id.clone())
        );

        // 排空后会话回到 Idle 且索引走完
        p.stop
            .handle(StopReading {
                session_id: result.session_id.clone(),
            })
            .await
            .unwrap();
        let session = p.sessions.get(&result.session_id).unwrap();
        assert_eq!(session.state, ReadingState::Idle);
        assert_eq!(session.current_index, 3);
    }

    #[tokio::test]
    async fn test_start_with_no_sentences_closes_session() {
        let p = pipeline("   \n  ");

        let err = p.start.handle(start_cmd()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
        // 失败的会话不残留
        assert!(p.sessions.list_all().is_empty());
    }

    #[tokio::test]
    async fn test_stop_unknown_session_is_not_found() {
        let p = pipeline("One.");
        let err = p
            .stop
            .handle(StopReading {
                session_id: "missing".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
