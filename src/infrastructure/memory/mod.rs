//! In-Memory Implementations - 内存实现
//!
//! 会话状态只存在于进程内存中，无持久化

mod session_manager;

pub use session_manager::InMemorySessionManager;
