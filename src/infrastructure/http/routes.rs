//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查
//! - /api/document/extract  POST  提取页码范围文本（multipart: file + start_page + end_page）
//! - /api/reading/start     POST  开始队列朗读（multipart，同上；替换进行中的朗读）
//! - /api/reading/stop      POST  停止朗读（排空队列）
//! - /api/reading/status    POST  查询会话状态
//! - /api/reading/sessions  GET   列出所有会话
//! - /api/speech/batch      POST  整段一次合成，返回 base64 音频

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/document", document_routes())
        .nest("/reading", reading_routes())
        .nest("/speech", speech_routes())
}

/// Document 路由
fn document_routes() -> Router<Arc<AppState>> {
    Router::new().route("/extract", post(handlers::extract_text))
}

/// Reading 路由
fn reading_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/start", post(handlers::start_reading))
        .route("/stop", post(handlers::stop_reading))
        .route("/status", post(handlers::reading_status))
        .route("/sessions", get(handlers::list_sessions))
}

/// Speech 路由
fn speech_routes() -> Router<Arc<AppState>> {
    Router::new().route("/batch", post(handlers::synthesize_batch))
}
