//! Reading Handlers - 队列朗读的启动 / 停止 / 状态

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::application::{GetReadingStatus, ListSessions, StartReading, StopReading};
use crate::infrastructure::http::dto::{
    ApiResponse, ReadingStatusRequest, ReadingStatusResponse, SessionSummaryResponse,
    StartReadingResponse, StopReadingRequest, StopReadingResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::handlers::document::read_document_upload;
use crate::infrastructure::http::state::AppState;

/// 开始朗读：上传 PDF + 页码范围，分句后进入播放队列
///
/// 已有朗读在进行时先排空旧 worker 再启动新会话
pub async fn start_reading(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<StartReadingResponse>>, ApiError> {
    let upload = read_document_upload(multipart).await?;

    let cmd = StartReading {
        data: upload.data,
        start_page: upload.start_page,
        end_page: upload.end_page,
    };

    let result = state.start_reading_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(StartReadingResponse {
        session_id: result.session_id,
        total_sentences: result.total_sentences,
        total_pages: result.total_pages,
        text: result.text,
    })))
}

/// 停止朗读（协作式排空）
pub async fn stop_reading(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StopReadingRequest>,
) -> Result<Json<ApiResponse<StopReadingResponse>>, ApiError> {
    let cmd = StopReading {
        session_id: req.session_id,
    };

    let result = state.stop_reading_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(StopReadingResponse {
        session_id: result.session_id,
        drained: result.drained,
    })))
}

/// 查询会话状态
pub async fn reading_status(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReadingStatusRequest>,
) -> Result<Json<ApiResponse<ReadingStatusResponse>>, ApiError> {
    let query = GetReadingStatus {
        session_id: req.session_id,
    };

    let result = state.reading_status_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(ReadingStatusResponse {
        session_id: result.session_id,
        state: result.state,
        current_index: result.current_index,
        total_sentences: result.total_sentences,
        created_at: result.created_at,
    })))
}

/// 列出所有会话
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<SessionSummaryResponse>>> {
    let sessions = state.list_sessions_handler.handle(ListSessions).await;

    let responses = sessions
        .into_iter()
        .map(|s| SessionSummaryResponse {
            session_id: s.session_id,
            state: s.state,
        })
        .collect();

    Json(ApiResponse::success(responses))
}
