//! Speech Command Handlers - 批量合成

use std::sync::Arc;

use crate::application::commands::handlers::document_handlers::stage_and_extract;
use crate::application::commands::reading_commands::{SynthesizeBatch, SynthesizeBatchResult};
use crate::application::error::ApplicationError;
use crate::application::ports::{SpeechSynthesizerPort, TextExtractorPort};

/// SynthesizeBatch Handler - 整段范围一次合成
///
/// 提取失败中止整个操作；合成失败只影响音频，已提取的文本
/// 仍返回给调用方展示（错误信息里带上文本由 HTTP 层决定）
pub struct SynthesizeBatchHandler {
    extractor: Arc<dyn TextExtractorPort>,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
}

impl SynthesizeBatchHandler {
    pub fn new(
        extractor: Arc<dyn TextExtractorPort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
    ) -> Self {
        Self {
            extractor,
            synthesizer,
        }
    }

    pub async fn handle(
        &self,
        cmd: SynthesizeBatch,
    ) -> Result<SynthesizeBatchResult, ApplicationError> {
        let extracted = stage_and_extract(
            self.extractor.as_ref(),
            &cmd.data,
            cmd.start_page,
            cmd.end_page,
        )?;

        if extracted.text.trim().is_empty() {
            return Err(ApplicationError::validation(
                "No text in the selected pages",
            ));
        }

        // 重试与退避在合成适配器内部完成，这里只看到最终结果
        let clip = self.synthesizer.synthesize(&extracted.text).await?;

        tracing::info!(
            chars = extracted.text.len(),
            audio_size = clip.data.len(),
            media_type = %clip.media_type,
            "Batch synthesis completed"
        );

        Ok(SynthesizeBatchResult {
            text: extracted.text,
            total_pages: extracted.total_pages,
            clip,
        })
    }
}
