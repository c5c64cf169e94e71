//! 合成重试策略
//!
//! 有界指数退避：初始退避时长每次失败后翻倍，直到尝试次数耗尽。
//! 两个预设对应不同的服务配额策略，通过配置选择，不做合并：
//! - quick: 3 次尝试，2s 起步，任何错误都重试
//! - strict: 5 次尝试，5s 起步，仅限流错误重试

use std::future::Future;
use std::time::Duration;

use crate::application::ports::SynthesisError;

/// 重试触发条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryMode {
    /// 任何错误都重试
    AnyError,
    /// 仅限流（RateLimited）重试，其余错误立即失败
    RateLimitOnly,
}

/// 重试策略
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 总尝试次数（含首次）
    pub max_attempts: u32,
    /// 首次失败后的退避时长
    pub initial_backoff: Duration,
    pub mode: RetryMode,
}

impl RetryPolicy {
    /// 预设: 3 次尝试，2s 起步，任何错误都重试
    pub fn quick() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(2),
            mode: RetryMode::AnyError,
        }
    }

    /// 预设: 5 次尝试，5s 起步，仅限流重试
    pub fn strict() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_secs(5),
            mode: RetryMode::RateLimitOnly,
        }
    }

    /// 该错误是否允许再次尝试
    pub fn should_retry(&self, err: &SynthesisError) -> bool {
        match self.mode {
            RetryMode::AnyError => true,
            RetryMode::RateLimitOnly => err.is_rate_limited(),
        }
    }

    /// 第 attempt 次失败后的退避时长（attempt 从 1 开始），逐次翻倍
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(1u32 << (attempt - 1).min(31))
    }
}

/// 按策略执行带退避的重试
///
/// op 接收当前尝试序号（从 1 开始）。重试耗尽或遇到不可重试错误时
/// 返回最后一次的错误
pub async fn run_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, SynthesisError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, SynthesisError>>,
{
    let mut attempt = 1u32;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= policy.max_attempts || !policy.should_retry(&err) {
                    return Err(err);
                }
                let backoff = policy.backoff_after(attempt);
                tracing::warn!(
                    attempt = attempt,
                    max_attempts = policy.max_attempts,
                    backoff_ms = backoff.as_millis() as u64,
                    error = %err,
                    "Synthesis attempt failed, backing off"
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}
