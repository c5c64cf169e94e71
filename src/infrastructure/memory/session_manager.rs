//! In-Memory Session Manager Implementation

use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{SessionError, SessionManagerPort};
use crate::domain::{ReadingSession, ReadingState};

/// 内存会话管理器
pub struct InMemorySessionManager {
    sessions: DashMap<String, ReadingSession>,
}

impl InMemorySessionManager {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemorySessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManagerPort for InMemorySessionManager {
    fn create(&self, session: ReadingSession) -> Result<String, SessionError> {
        let session_id = session.id.clone();
        if self.sessions.contains_key(&session_id) {
            return Err(SessionError::AlreadyExists(session_id));
        }
        self.sessions.insert(session_id.clone(), session);
        tracing::info!(session_id = %session_id, "Reading session created");
        Ok(session_id)
    }

    fn get(&self, id: &str) -> Result<ReadingSession, SessionError> {
        self.sessions
            .get(id)
            .map(|s| s.clone())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn set_state(&self, id: &str, state: ReadingState) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        if !session.state.can_transition_to(state) {
            return Err(SessionError::InvalidTransition {
                from: session.state,
                to: state,
            });
        }

        tracing::debug!(session_id = %id, from = %session.state, to = %state, "Session state changed");
        session.state = state;
        session.last_activity = Utc::now();
        Ok(())
    }

    fn set_total(&self, id: &str, total: usize) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        session.total_sentences = total;
        session.last_activity = Utc::now();
        Ok(())
    }

    fn advance(&self, id: &str, index: usize) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        session.current_index = index;
        session.last_activity = Utc::now();
        tracing::debug!(session_id = %id, index = index, "Session index advanced");
        Ok(())
    }

    fn is_valid(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    fn touch(&self, id: &str) {
        if let Some(mut session) = self.sessions.get_mut(id) {
            session.last_activity = Utc::now();
        }
    }

    fn close(&self, id: &str) -> Result<(), SessionError> {
        self.sessions
            .remove(id)
            .map(|_| {
                tracing::info!(session_id = %id, "Reading session closed");
            })
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String> {
        let now = Utc::now();
        let timeout = chrono::Duration::seconds(idle_timeout_secs as i64);

        self.sessions
            .iter()
            .filter_map(|entry| {
                let elapsed = now - entry.last_activity;
                if elapsed > timeout {
                    Some(entry.key().clone())
                } else {
                    None
                }
            })
            .collect()
    }

    fn list_all(&self) -> Vec<String> {
        self.sessions.iter().map(|e| e.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let manager = InMemorySessionManager::new();
        let session = ReadingSession::new();
        let session_id = session.id.clone();

        // Create
        let result = manager.create(session);
        assert!(result.is_ok());

        // Get
        let session = manager.get(&session_id).unwrap();
        assert_eq!(session.state, ReadingState::Idle);

        // 沿状态机推进
        manager.set_state(&session_id, ReadingState::Extracting).unwrap();
        manager.set_state(&session_id, ReadingState::Queued).unwrap();
        manager.set_total(&session_id, 12).unwrap();
        manager.set_state(&session_id, ReadingState::Playing).unwrap();
        manager.advance(&session_id, 3).unwrap();

        let session = manager.get(&session_id).unwrap();
        assert_eq!(session.state, ReadingState::Playing);
        assert_eq!(session.total_sentences, 12);
        assert_eq!(session.current_index, 3);

        // Close
        assert!(manager.is_valid(&session_id));
        manager.close(&session_id).unwrap();
        assert!(!manager.is_valid(&session_id));
    }

    #[test]
    fn test_invalid_transition_rejected() {
        let manager = InMemorySessionManager::new();
        let session_id = manager.create(ReadingSession::new()).unwrap();

        // Idle -> Playing 不在转移表中
        let err = manager
            .set_state(&session_id, ReadingState::Playing)
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { .. }));

        // 状态未被污染
        assert_eq!(manager.get(&session_id).unwrap().state, ReadingState::Idle);
    }

    #[test]
    fn test_get_missing_session() {
        let manager = InMemorySessionManager::new();
        assert!(matches!(
            manager.get("missing"),
            Err(SessionError::NotFound(_))
        ));
    }

    #[test]
    fn test_expired_sessions_sweep() {
        let manager = InMemorySessionManager::new();
        let mut stale = ReadingSession::new();
        stale.last_activity = Utc::now() - chrono::Duration::seconds(600);
        let stale_id = stale.id.clone();
        manager.create(stale).unwrap();

        let fresh_id = manager.create(ReadingSession::new()).unwrap();

        let expired = manager.get_expired_sessions(300);
        assert!(expired.contains(&stale_id));
        assert!(!expired.contains(&fresh_id));
    }
}
