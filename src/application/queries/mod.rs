//! Application Queries - CQRS 查询

pub mod handlers;
mod session_queries;

pub use session_queries::{GetReadingStatus, ListSessions, ReadingStatusResult, SessionSummary};
