//! Reading Commands - 朗读命令定义

use crate::application::ports::AudioClip;

/// 提取文本（预览用）
#[derive(Debug)]
pub struct ExtractText {
    /// 上传的 PDF 字节
    pub data: Vec<u8>,
    /// 起始页（1-indexed）
    pub start_page: u32,
    /// 结束页，缺省为文档末页
    pub end_page: Option<u32>,
}

#[derive(Debug)]
pub struct ExtractTextResult {
    pub text: String,
    pub total_pages: u32,
    /// 实际生效的范围
    pub start_page: u32,
    pub end_page: u32,
}

/// 开始朗读（句子队列管线）
#[derive(Debug)]
pub struct StartReading {
    pub data: Vec<u8>,
    pub start_page: u32,
    pub end_page: Option<u32>,
}

#[derive(Debug)]
pub struct StartReadingResult {
    pub session_id: String,
    pub total_sentences: usize,
    pub text: String,
    pub total_pages: u32,
}

/// 停止朗读
#[derive(Debug)]
pub struct StopReading {
    pub session_id: String,
}

#[derive(Debug)]
pub struct StopReadingResult {
    pub session_id: String,
    /// 是否真的有 worker 被排空
    pub drained: bool,
}

/// 批量合成（整段文本一次合成，交给外部音频控件播放）
#[derive(Debug)]
pub struct SynthesizeBatch {
    pub data: Vec<u8>,
    pub start_page: u32,
    pub end_page: Option<u32>,
}

#[derive(Debug)]
pub struct SynthesizeBatchResult {
    pub text: String,
    pub total_pages: u32,
    pub clip: AudioClip,
}
