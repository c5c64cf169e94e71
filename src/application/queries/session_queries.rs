//! Session Queries - 会话状态查询

/// 查询单个会话状态
#[derive(Debug)]
pub struct GetReadingStatus {
    pub session_id: String,
}

#[derive(Debug)]
pub struct ReadingStatusResult {
    pub session_id: String,
    pub state: &'static str,
    pub current_index: usize,
    pub total_sentences: usize,
    pub created_at: String,
}

/// 列出所有会话
#[derive(Debug)]
pub struct ListSessions;

#[derive(Debug)]
pub struct SessionSummary {
    pub session_id: String,
    pub state: &'static str,
}
