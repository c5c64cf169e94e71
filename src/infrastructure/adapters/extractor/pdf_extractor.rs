//! PDF Text Extractor - lopdf 文本提取实现
//!
//! 实现 TextExtractorPort trait。纯 Rust 解析，只读，不落盘

use std::path::Path;

use lopdf::Document;

use crate::application::ports::{ExtractError, ExtractedText, TextExtractorPort};
use crate::domain::PageRange;

/// lopdf 文本提取器
#[derive(Debug, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 打开并校验文档
    fn open(&self, path: &Path) -> Result<Document, ExtractError> {
        let doc =
            Document::load(path).map_err(|e| ExtractError::DocumentParse(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(ExtractError::DocumentParse(
                "document is encrypted".to_string(),
            ));
        }

        Ok(doc)
    }
}

impl TextExtractorPort for PdfTextExtractor {
    fn page_count(&self, path: &Path) -> Result<u32, ExtractError> {
        Ok(self.open(path)?.get_pages().len() as u32)
    }

    fn extract(&self, path: &Path, range: PageRange) -> Result<ExtractedText, ExtractError> {
        let doc = self.open(path)?;
        let total_pages = doc.get_pages().len() as u32;

        if total_pages == 0 {
            return Err(ExtractError::DocumentParse(
                "document has no pages".to_string(),
            ));
        }
        if range.start() > total_pages {
            return Err(ExtractError::RangeError(format!(
                "start_page {} is beyond the last page ({})",
                range.start(),
                total_pages
            )));
        }

        // end 超出总页数时 clamp；start 的有效性由上面的检查保证
        let range = range.clamp_to(total_pages);

        let mut pages_text = Vec::with_capacity(range.len() as usize);
        for page_number in range.pages() {
            let page_text = doc.extract_text(&[page_number]).map_err(|e| {
                ExtractError::DocumentParse(format!("page {}: {}", page_number, e))
            })?;
            // lopdf 在每页文本末尾补换行，去掉后统一用 '\n' 拼接
            pages_text.push(page_text.trim_end_matches('\n').to_string());
        }

        tracing::debug!(
            path = %path.display(),
            range = %range,
            total_pages = total_pages,
            chars = pages_text.iter().map(|t| t.len()).sum::<usize>(),
            "Text extracted"
        );

        Ok(ExtractedText {
            text: pages_text.join("\n"),
            total_pages,
            range,
        })
    }
}
