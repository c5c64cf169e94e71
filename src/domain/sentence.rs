//! 句子分割
//!
//! 将提取出的文本按句号分割为朗读单元，供播放队列消费

/// 句子终止符
///
/// 按原始朗读行为只以 '.' 分句，逗号等弱分隔符不切分
const SENTENCE_TERMINATOR: char = '.';

/// 朗读单元
///
/// 提取文本的一个非空子串，已去除首尾空白，index 为源文本中的顺序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceUnit {
    pub index: usize,
    pub text: String,
}

impl SentenceUnit {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// 将文本分割为朗读单元
///
/// 分割策略：
/// 1. 按 '.' 分割
/// 2. 去除每段首尾空白（含换行）
/// 3. 丢弃空片段，顺序与源文本一致
pub fn split_sentences(text: &str) -> Vec<SentenceUnit> {
    text.split(SENTENCE_TERMINATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(index, s)| SentenceUnit::new(index, s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(units: &[SentenceUnit]) -> Vec<&str> {
        units.iter().map(|u| u.text.as_str()).collect()
    }

    #[test]
    fn test_split_basic() {
        let units = split_sentences("Hello world. This is VoiceRead. Testing.");
        assert_eq!(texts(&units), vec!["Hello world", "This is VoiceRead", "Testing"]);
    }

    #[test]
    fn test_indices_follow_source_order() {
        let units = split_sentences("One. Two. Three.");
        let indices: Vec<usize> = units.iter().map(|u| u.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_fragments_dropped() {
        // 连续句号与末尾句号产生的空片段应被丢弃
        let units = split_sentences("First... Second.");
        assert_eq!(texts(&units), vec!["First", "Second"]);
    }

    #[test]
    fn test_whitespace_trimmed() {
        let units = split_sentences("  Page one text.\nPage two text.  ");
        assert_eq!(texts(&units), vec!["Page one text", "Page two text"]);
    }

    #[test]
    fn test_newline_only_fragment_dropped() {
        let units = split_sentences(".\n.\n");
        assert!(units.is_empty());
    }

    #[test]
    fn test_no_terminator_yields_single_unit() {
        let units = split_sentences("no terminator here");
        assert_eq!(texts(&units), vec!["no terminator here"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n  ").is_empty());
    }
}
