//! HTTP TTS Client - 调用外部 TTS HTTP 服务
//!
//! 实现 SpeechSynthesizerPort trait，通过 HTTP 调用外部 TTS 服务，
//! 限流（HTTP 429）按配置的退避策略重试
//!
//! 外部 TTS API:
//! POST {base_url}/api/tts/synthesize
//! Request: {"text": "...", "language": "en"}  (JSON)
//! Response: audio binary, Content-Type 标明编码格式

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{AudioClip, SpeechSynthesizerPort, SynthesisError};

use super::retry::{run_with_retry, RetryPolicy};

/// TTS 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct TtsHttpRequest<'a> {
    /// 要合成的文本
    text: &'a str,
    /// 合成语言
    language: &'a str,
}

/// HTTP TTS 客户端配置
#[derive(Debug, Clone)]
pub struct HttpTtsClientConfig {
    /// TTS 服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 合成语言
    pub language: String,
    /// 限流重试策略
    pub retry: RetryPolicy,
}

impl Default for HttpTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 120,
            language: "en".to_string(),
            retry: RetryPolicy::strict(),
        }
    }
}

impl HttpTtsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// HTTP TTS 客户端
pub struct HttpTtsClient {
    client: Client,
    config: HttpTtsClientConfig,
}

impl HttpTtsClient {
    /// 创建新的 HTTP TTS 客户端
    pub fn new(config: HttpTtsClientConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取合成 URL
    fn synthesize_url(&self) -> String {
        format!("{}/api/tts/synthesize", self.config.base_url)
    }

    /// 获取健康检查 URL
    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url)
    }

    /// 单次合成请求，不含重试
    async fn synthesize_once(&self, text: &str) -> Result<AudioClip, SynthesisError> {
        let request = TtsHttpRequest {
            text,
            language: &self.config.language,
        };

        let response = self
            .client
            .post(self.synthesize_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else if e.is_connect() {
                    SynthesisError::Network(format!("Cannot connect to TTS service: {}", e))
                } else {
                    SynthesisError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let detail = response.text().await.unwrap_or_default();
            return Err(SynthesisError::RateLimited(detail));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Failure(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let media_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/wav")
            .to_string();
        let duration_ms = response
            .headers()
            .get("X-TTS-Duration-Ms")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let data = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Failure(format!("Failed to read audio: {}", e)))?
            .to_vec();

        Ok(AudioClip {
            data,
            media_type,
            duration_ms,
        })
    }
}

#[async_trait]
impl SpeechSynthesizerPort for HttpTtsClient {
    async fn synthesize(&self, text: &str) -> Result<AudioClip, SynthesisError> {
        tracing::debug!(
            url = %self.synthesize_url(),
            text_len = text.len(),
            language = %self.config.language,
            "Sending TTS synthesize request"
        );

        let clip = run_with_retry(&self.config.retry, |_attempt| {
            self.synthesize_once(text)
        })
        .await?;

        tracing::info!(
            audio_size = clip.data.len(),
            media_type = %clip.media_type,
            duration_ms = ?clip.duration_ms,
            "TTS synthesis completed"
        );

        Ok(clip)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::retry::RetryMode;
    use super::*;
    use axum::response::IntoResponse;
    use axum::{routing::post, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_config_default() {
        let config = HttpTtsClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.retry.max_attempts, 5);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpTtsClientConfig::new("http://example.com:9000").with_timeout(60);
        assert_eq!(config.base_url, "http://example.com:9000");
        assert_eq!(config.timeout_secs, 60);
    }

    /// 在回环地址起一个打桩 TTS 服务
    async fn spawn_stub_server(hits: Arc<AtomicUsize>, fail_times: usize) -> String {
        let app = Router::new().route(
            "/api/tts/synthesize",
            post({
                let hits = hits.clone();
                move || {
                    let hits = hits.clone();
                    async move {
                        if hits.fetch_add(1, Ordering::SeqCst) < fail_times {
                            (axum::http::StatusCode::TOO_MANY_REQUESTS, "slow down")
                                .into_response()
                        } else {
                            (
                                [(axum::http::header::CONTENT_TYPE, "audio/wav")],
                                b"RIFFfake".to_vec(),
                            )
                                .into_response()
                        }
                    }
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn millis_retry(max_attempts: u32, mode: RetryMode) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_backoff: Duration::from_millis(1),
            mode,
        }
    }

    #[tokio::test]
    async fn test_retries_rate_limited_then_succeeds() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_stub_server(hits.clone(), 2).await;

        let config = HttpTtsClientConfig::new(base_url)
            .with_retry(millis_retry(5, RetryMode::RateLimitOnly));
        let client = HttpTtsClient::new(config).unwrap();

        let clip = client.synthesize("Hello world").await.unwrap();
        assert_eq!(clip.data, b"RIFFfake");
        assert_eq!(clip.media_type, "audio/wav");
        // 2 次 429 + 1 次成功
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_rate_limit_exhaustion_reports_failure() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_stub_server(hits.clone(), usize::MAX).await;

        let config = HttpTtsClientConfig::new(base_url)
            .with_retry(millis_retry(3, RetryMode::RateLimitOnly));
        let client = HttpTtsClient::new(config).unwrap();

        let err = client.synthesize("Hello world").await.unwrap_err();
        assert!(err.is_rate_limited());
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
