//! Session Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::SessionManagerPort;
use crate::application::queries::session_queries::{
    GetReadingStatus, ListSessions, ReadingStatusResult, SessionSummary,
};

/// GetReadingStatus Handler
pub struct GetReadingStatusHandler {
    sessions: Arc<dyn SessionManagerPort>,
}

impl GetReadingStatusHandler {
    pub fn new(sessions: Arc<dyn SessionManagerPort>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        query: GetReadingStatus,
    ) -> Result<ReadingStatusResult, ApplicationError> {
        let session = self.sessions.get(&query.session_id)?;

        Ok(ReadingStatusResult {
            session_id: session.id,
            state: session.state.as_str(),
            current_index: session.current_index,
            total_sentences: session.total_sentences,
            created_at: session.created_at.to_rfc3339(),
        })
    }
}

/// ListSessions Handler
pub struct ListSessionsHandler {
    sessions: Arc<dyn SessionManagerPort>,
}

impl ListSessionsHandler {
    pub fn new(sessions: Arc<dyn SessionManagerPort>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, _query: ListSessions) -> Vec<SessionSummary> {
        self.sessions
            .list_all()
            .into_iter()
            .filter_map(|id| self.sessions.get(&id).ok())
            .map(|session| SessionSummary {
                session_id: session.id,
                state: session.state.as_str(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReadingSession;
    use crate::infrastructure::memory::InMemorySessionManager;

    #[tokio::test]
    async fn test_status_for_existing_session() {
        let sessions = Arc::new(InMemorySessionManager::new());
        let session_id = sessions.create(ReadingSession::new()).unwrap();

        let handler = GetReadingStatusHandler::new(sessions);
        let status = handler
            .handle(GetReadingStatus {
                session_id: session_id.clone(),
            })
            .await
            .unwrap();

        assert_eq!(status.session_id, session_id);
        assert_eq!(status.state, "idle");
        assert_eq!(status.total_sentences, 0);
    }

    #[tokio::test]
    async fn test_status_for_missing_session() {
        let sessions = Arc::new(InMemorySessionManager::new());
        let handler = GetReadingStatusHandler::new(sessions);

        let err = handler
            .handle(GetReadingStatus {
                session_id: "missing".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_sessions() {
        let sessions = Arc::new(InMemorySessionManager::new());
        sessions.create(ReadingSession::new()).unwrap();
        sessions.create(ReadingSession::new()).unwrap();

        let handler = ListSessionsHandler::new(sessions);
        let list = handler.handle(ListSessions).await;
        assert_eq!(list.len(), 2);
    }
}
