//! Storage Adapter - 上传文档的临时存储

mod temp_document;

pub use temp_document::TempDocument;
