//! Query Handlers

mod session_handlers;

pub use session_handlers::{GetReadingStatusHandler, ListSessionsHandler};
