//! Document Handlers - PDF 上传与文本提取

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::application::ExtractText;
use crate::infrastructure::http::dto::{ApiResponse, ExtractResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 解析后的上传表单
pub(crate) struct DocumentUpload {
    pub data: Vec<u8>,
    pub start_page: u32,
    pub end_page: Option<u32>,
}

/// 读取 multipart 表单：file（PDF 字节）+ start_page + end_page（可选）
pub(crate) async fn read_document_upload(
    mut multipart: Multipart,
) -> Result<DocumentUpload, ApiError> {
    let mut data: Option<Vec<u8>> = None;
    let mut start_page: u32 = 1;
    let mut end_page: Option<u32> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "file" => {
                let filename = field.file_name().map(|s| s.to_string());

                // 验证文件类型
                let content_type = field.content_type().unwrap_or("application/octet-stream");
                let is_pdf_name = filename
                    .as_ref()
                    .map(|f| f.to_lowercase().ends_with(".pdf"))
                    .unwrap_or(false);
                let is_pdf_type = content_type.contains("pdf");

                if !is_pdf_name && !is_pdf_type {
                    return Err(ApiError::BadRequest(
                        "Only PDF files are allowed".to_string(),
                    ));
                }

                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

                data = Some(bytes.to_vec());
            }
            "start_page" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read start_page: {}", e)))?;
                start_page = raw
                    .trim()
                    .parse()
                    .map_err(|_| ApiError::BadRequest(format!("Invalid start_page: {}", raw)))?;
            }
            "end_page" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read end_page: {}", e)))?;
                let raw = raw.trim().to_string();
                if !raw.is_empty() {
                    end_page = Some(
                        raw.parse()
                            .map_err(|_| ApiError::BadRequest(format!("Invalid end_page: {}", raw)))?,
                    );
                }
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| ApiError::BadRequest("File is required".to_string()))?;
    if data.is_empty() {
        return Err(ApiError::BadRequest("Uploaded file is empty".to_string()));
    }

    Ok(DocumentUpload {
        data,
        start_page,
        end_page,
    })
}

/// 提取页码范围内的文本（预览展示用，不产生会话）
pub async fn extract_text(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ExtractResponse>>, ApiError> {
    let upload = read_document_upload(multipart).await?;

    let cmd = ExtractText {
        data: upload.data,
        start_page: upload.start_page,
        end_page: upload.end_page,
    };

    let result = state.extract_text_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(ExtractResponse {
        text: result.text,
        total_pages: result.total_pages,
        start_page: result.start_page,
        end_page: result.end_page,
    })))
}
