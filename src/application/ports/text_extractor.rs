//! Text Extractor Port - PDF 文本提取抽象
//!
//! 定义文本提取的抽象接口，具体实现在 infrastructure/extractor 层

use std::path::Path;
use thiserror::Error;

use crate::domain::PageRange;

/// 提取错误
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 文档无法解析（损坏或加密）
    #[error("Document cannot be parsed: {0}")]
    DocumentParse(String),

    /// 页码范围无效
    #[error("Invalid page range: {0}")]
    RangeError(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        ExtractError::Io(err.to_string())
    }
}

/// 提取结果
#[derive(Debug, Clone)]
pub struct ExtractedText {
    /// 范围内各页文本按页序以换行符拼接
    pub text: String,
    /// 文档总页数
    pub total_pages: u32,
    /// 实际生效的范围（end 已 clamp 到总页数）
    pub range: PageRange,
}

/// Text Extractor Port
///
/// 只读操作，不修改文档
pub trait TextExtractorPort: Send + Sync {
    /// 读取文档总页数
    fn page_count(&self, path: &Path) -> Result<u32, ExtractError>;

    /// 提取指定页码范围的文本
    ///
    /// end 超出总页数时 clamp 到总页数；start 超出总页数报 RangeError
    fn extract(&self, path: &Path, range: PageRange) -> Result<ExtractedText, ExtractError>;
}
