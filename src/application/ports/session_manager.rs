//! Session Manager Port - 朗读会话生命周期管理
//!
//! 定义会话管理的抽象接口，具体实现在 infrastructure/memory 层

use thiserror::Error;

use crate::domain::{ReadingSession, ReadingState};

/// Session Manager 错误
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: ReadingState,
        to: ReadingState,
    },
}

/// Session Manager Port
///
/// 管理朗读会话的生命周期，所有状态存储在内存中
pub trait SessionManagerPort: Send + Sync {
    /// 创建新会话，返回会话 ID
    fn create(&self, session: ReadingSession) -> Result<String, SessionError>;

    /// 获取会话
    fn get(&self, id: &str) -> Result<ReadingSession, SessionError>;

    /// 状态转移（按状态机校验）
    fn set_state(&self, id: &str, state: ReadingState) -> Result<(), SessionError>;

    /// 设置入队句子总数
    fn set_total(&self, id: &str, total: usize) -> Result<(), SessionError>;

    /// 推进当前播放索引
    fn advance(&self, id: &str, index: usize) -> Result<(), SessionError>;

    /// 检查会话是否存在
    fn is_valid(&self, id: &str) -> bool;

    /// 更新最后活动时间
    fn touch(&self, id: &str);

    /// 关闭会话
    fn close(&self, id: &str) -> Result<(), SessionError>;

    /// 获取所有超时未活动的会话 ID
    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String>;

    /// 获取所有会话 ID
    fn list_all(&self) -> Vec<String>;
}
