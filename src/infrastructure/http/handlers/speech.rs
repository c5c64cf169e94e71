//! Speech Handlers - 批量合成

use axum::{
    extract::{Multipart, State},
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::Arc;

use crate::application::SynthesizeBatch;
use crate::infrastructure::http::dto::{ApiResponse, BatchSpeechResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::handlers::document::read_document_upload;
use crate::infrastructure::http::state::AppState;

/// 整段范围一次合成，音频 base64 内嵌返回
///
/// 提取失败中止整个请求；合成失败（重试耗尽后）不产生音频，
/// 调用方已展示的文本不受影响
pub async fn synthesize_batch(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<BatchSpeechResponse>>, ApiError> {
    let upload = read_document_upload(multipart).await?;

    let cmd = SynthesizeBatch {
        data: upload.data,
        start_page: upload.start_page,
        end_page: upload.end_page,
    };

    let result = state.synthesize_batch_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(BatchSpeechResponse {
        text: result.text,
        total_pages: result.total_pages,
        media_type: result.clip.media_type.clone(),
        audio_base64: BASE64.encode(&result.clip.data),
    })))
}
