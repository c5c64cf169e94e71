//! Data Transfer Objects

use serde::{Deserialize, Serialize};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    #[allow(dead_code)]
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Document DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub total_pages: u32,
    pub start_page: u32,
    pub end_page: u32,
}

// ============================================================================
// Reading DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct StartReadingResponse {
    pub session_id: String,
    pub total_sentences: usize,
    pub total_pages: u32,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct StopReadingRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct StopReadingResponse {
    pub session_id: String,
    pub drained: bool,
}

#[derive(Debug, Deserialize)]
pub struct ReadingStatusRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct ReadingStatusResponse {
    pub session_id: String,
    pub state: &'static str,
    pub current_index: usize,
    pub total_sentences: usize,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct SessionSummaryResponse {
    pub session_id: String,
    pub state: &'static str,
}

// ============================================================================
// Speech DTOs
// ============================================================================

/// 批量合成响应：音频以 base64 内嵌，供外部音频控件直接挂载
#[derive(Debug, Serialize)]
pub struct BatchSpeechResponse {
    pub text: String,
    pub total_pages: u32,
    pub media_type: String,
    pub audio_base64: String,
}
