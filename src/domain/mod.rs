//! Domain Layer - 领域层
//!
//! 纯领域逻辑，不依赖基础设施:
//! - PageRange: 页码范围值对象
//! - SentenceUnit / split_sentences: 句子分割
//! - ReadingState / ReadingSession: 朗读会话状态机

pub mod page_range;
pub mod sentence;
pub mod session;

pub use page_range::PageRange;
pub use sentence::{split_sentences, SentenceUnit};
pub use session::{ReadingSession, ReadingState};
