//! Extractor Adapter - PDF 文本提取实现

mod pdf_extractor;

pub use pdf_extractor::PdfTextExtractor;
