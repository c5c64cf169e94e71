//! 朗读会话
//!
//! 显式的会话状态机，替代全局可变状态：
//! Idle -> Extracting -> Queued -> Playing -> Idle
//! 任一活动状态可回到 Idle（出错 / 停止 / 播放完成）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingState {
    /// 空闲（初始态 / 终态）
    Idle,
    /// 正在提取 PDF 文本
    Extracting,
    /// 句子已入队，等待首句播放
    Queued,
    /// 正在播放
    Playing,
}

impl ReadingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingState::Idle => "idle",
            ReadingState::Extracting => "extracting",
            ReadingState::Queued => "queued",
            ReadingState::Playing => "playing",
        }
    }

    /// 状态转移表
    pub fn can_transition_to(&self, next: ReadingState) -> bool {
        use ReadingState::*;
        matches!(
            (self, next),
            (Idle, Extracting)
                | (Extracting, Queued)
                | (Queued, Playing)
                // 活动状态均可回到 Idle
                | (Extracting, Idle)
                | (Queued, Idle)
                | (Playing, Idle)
        )
    }
}

impl std::fmt::Display for ReadingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 朗读会话（内存态）
#[derive(Debug, Clone)]
pub struct ReadingSession {
    pub id: String,
    pub state: ReadingState,
    /// 入队的句子总数（提取完成后填充）
    pub total_sentences: usize,
    /// 当前已播放到的句子序号
    pub current_index: usize,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl ReadingSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            state: ReadingState::Idle,
            total_sentences: 0,
            current_index: 0,
            created_at: now,
            last_activity: now,
        }
    }
}

impl Default for ReadingSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        use ReadingState::*;
        assert!(Idle.can_transition_to(Extracting));
        assert!(Extracting.can_transition_to(Queued));
        assert!(Queued.can_transition_to(Playing));
        assert!(Playing.can_transition_to(Idle));
    }

    #[test]
    fn test_active_states_can_abort_to_idle() {
        use ReadingState::*;
        assert!(Extracting.can_transition_to(Idle));
        assert!(Queued.can_transition_to(Idle));
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        use ReadingState::*;
        assert!(!Idle.can_transition_to(Playing));
        assert!(!Idle.can_transition_to(Queued));
        assert!(!Playing.can_transition_to(Extracting));
        assert!(!Queued.can_transition_to(Extracting));
        assert!(!Idle.can_transition_to(Idle));
    }

    #[test]
    fn test_new_session_starts_idle() {
        let session = ReadingSession::new();
        assert_eq!(session.state, ReadingState::Idle);
        assert_eq!(session.current_index, 0);
        assert_eq!(session.total_sentences, 0);
    }

    #[test]
    fn test_state_as_str() {
        assert_eq!(ReadingState::Playing.as_str(), "playing");
        assert_eq!(ReadingState::Extracting.to_string(), "extracting");
    }
}
