//! Temp Document - 上传文档的临时落盘
//!
//! 上传的 PDF 字节在提取期间写入临时文件，作用域结束即删除，
//! 成功、出错、panic 路径一致（scoped acquisition）

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

/// 作用域内的临时文档
///
/// Drop 时删除底层文件
pub struct TempDocument {
    file: NamedTempFile,
}

impl TempDocument {
    /// 将上传字节写入临时文件
    pub fn write(bytes: &[u8]) -> Result<Self, std::io::Error> {
        let mut file = tempfile::Builder::new()
            .prefix("voiceread-doc-")
            .suffix(".pdf")
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;

        tracing::debug!(
            path = %file.path().display(),
            size = bytes.len(),
            "Uploaded document staged to temp file"
        );

        Ok(Self { file })
    }

    /// 提取期间可读取的路径
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_written_bytes_readable() {
        let doc = TempDocument::write(b"%PDF-1.5 fake").unwrap();
        let read_back = std::fs::read(doc.path()).unwrap();
        assert_eq!(read_back, b"%PDF-1.5 fake");
    }

    #[test]
    fn test_file_removed_on_drop() {
        let path: PathBuf;
        {
            let doc = TempDocument::write(b"data").unwrap();
            path = doc.path().to_path_buf();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_file_removed_on_error_path() {
        // 模拟提取失败：持有 TempDocument 的调用以 Err 提前返回
        fn failing_extract(bytes: &[u8]) -> Result<String, (PathBuf, &'static str)> {
            let doc = TempDocument::write(bytes).unwrap();
            Err((doc.path().to_path_buf(), "corrupt document"))
        }

        let (path, _err) = failing_extract(b"not a pdf").unwrap_err();
        assert!(!path.exists());
    }
}
