//! Document Command Handlers - 文本提取

use std::sync::Arc;

use crate::application::commands::reading_commands::{ExtractText, ExtractTextResult};
use crate::application::error::ApplicationError;
use crate::application::ports::{ExtractedText, TextExtractorPort};
use crate::domain::PageRange;
use crate::infrastructure::adapters::TempDocument;

/// 将上传字节落盘到临时文件并提取页码范围内的文本
///
/// 临时文件在本函数返回时删除，成功与失败路径一致
pub(crate) fn stage_and_extract(
    extractor: &dyn TextExtractorPort,
    data: &[u8],
    start_page: u32,
    end_page: Option<u32>,
) -> Result<ExtractedText, ApplicationError> {
    let range = PageRange::new(start_page, end_page.unwrap_or(u32::MAX))
        .map_err(|msg| ApplicationError::RangeError(msg.to_string()))?;

    let document = TempDocument::write(data)
        .map_err(|e| ApplicationError::internal(format!("Failed to stage upload: {}", e)))?;

    let extracted = extractor.extract(document.path(), range)?;
    Ok(extracted)
}

/// ExtractText Handler - 提取文本供预览展示
pub struct ExtractTextHandler {
    extractor: Arc<dyn TextExtractorPort>,
}

impl ExtractTextHandler {
    pub fn new(extractor: Arc<dyn TextExtractorPort>) -> Self {
        Self { extractor }
    }

    pub async fn handle(&self, cmd: ExtractText) -> Result<ExtractTextResult, ApplicationError> {
        let extracted =
            stage_and_extract(self.extractor.as_ref(), &cmd.data, cmd.start_page, cmd.end_page)?;

        tracing::info!(
            total_pages = extracted.total_pages,
            range = %extracted.range,
            chars = extracted.text.len(),
            "Text extracted for preview"
        );

        Ok(ExtractTextResult {
            text: extracted.text,
            total_pages: extracted.total_pages,
            start_page: extracted.range.start(),
            end_page: extracted.range.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ExtractError;

    /// 固定文本的提取器桩
    struct StubExtractor {
        total_pages: u32,
    }

    impl TextExtractorPort for StubExtractor {
        fn page_count(&self, _path: &std::path::Path) -> Result<u32, ExtractError> {
            Ok(self.total_pages)
        }

        fn extract(
            &self,
            _path: &std::path::Path,
            range: PageRange,
        ) -> Result<ExtractedText, ExtractError> {
            if range.start() > self.total_pages {
                return Err(ExtractError::RangeError("start beyond last page".into()));
            }
            let range = range.clamp_to(self.total_pages);
            let text = range
                .pages()
                .map(|p| format!("page {}", p))
                .collect::<Vec<_>>()
                .join("\n");
            Ok(ExtractedText {
                text,
                total_pages: self.total_pages,
                range,
            })
        }
    }

    #[tokio::test]
    async fn test_extract_with_default_end_page() {
        let handler = ExtractTextHandler::new(Arc::new(StubExtractor { total_pages: 3 }));
        let result = handler
            .handle(ExtractText {
                data: b"pdf".to_vec(),
                start_page: 2,
                end_page: None,
            })
            .await
            .unwrap();

        assert_eq!(result.text, "page 2\npage 3");
        assert_eq!(result.start_page, 2);
        assert_eq!(result.end_page, 3);
    }

    #[tokio::test]
    async fn test_invalid_range_surfaces_range_error() {
        let handler = ExtractTextHandler::new(Arc::new(StubExtractor { total_pages: 3 }));
        let err = handler
            .handle(ExtractText {
                data: b"pdf".to_vec(),
                start_page: 0,
                end_page: Some(2),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::RangeError(_)));
    }

    #[tokio::test]
    async fn test_start_beyond_total_surfaces_range_error() {
        let handler = ExtractTextHandler::new(Arc::new(StubExtractor { total_pages: 3 }));
        let err = handler
            .handle(ExtractText {
                data: b"pdf".to_vec(),
                start_page: 9,
                end_page: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::RangeError(_)));
    }
}
