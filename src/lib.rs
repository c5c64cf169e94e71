//! VoiceRead - PDF 朗读服务
//!
//! 架构设计: Hexagonal Architecture + CQRS
//!
//! 领域层 (domain/):
//! - PageRange: 页码范围值对象
//! - SentenceUnit: 句子分割
//! - ReadingSession: 朗读会话状态机
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TextExtractor, SpeechSynthesizer, AudioSink, SessionManager）
//! - Commands: CQRS 命令处理器（提取 / 开始朗读 / 停止 / 批量合成）
//! - Queries: CQRS 查询处理器（会话状态）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: SessionManager 内存实现
//! - Worker: 句子队列播放 worker 与监督者
//! - Adapters: PDF 提取、TTS 客户端、音频输出、临时文档

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
