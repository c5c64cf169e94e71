//! 页码范围值对象
//!
//! 1-indexed 闭区间 [start, end]，end 需在提取前 clamp 到文档总页数

use serde::{Deserialize, Serialize};

/// 页码范围（1-indexed，闭区间）
///
/// 不变量: 1 <= start <= end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    /// 创建页码范围
    ///
    /// start 必须 >= 1 且 <= end，否则返回错误描述
    pub fn new(start: u32, end: u32) -> Result<Self, &'static str> {
        if start == 0 {
            return Err("start_page must be >= 1");
        }
        if end < start {
            return Err("end_page must be >= start_page");
        }
        Ok(Self { start, end })
    }

    /// 单页范围
    pub fn single(page: u32) -> Result<Self, &'static str> {
        Self::new(page, page)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// 将 end clamp 到文档总页数
    ///
    /// start 超出总页数不在此处处理，由提取器报 RangeError
    pub fn clamp_to(self, total_pages: u32) -> Self {
        Self {
            start: self.start,
            end: self.end.min(total_pages),
        }
    }

    /// 按顺序迭代范围内的页码
    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }

    /// 范围内的页数
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        false // 闭区间构造时已保证 start <= end
    }
}

impl std::fmt::Display for PageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
