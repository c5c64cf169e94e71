//! VoiceRead - PDF 朗读服务
//!
//! 上传 PDF 与页码范围，提取文本并朗读：
//! - 队列管线：逐句合成，在服务端音频设备上按序播放
//! - 批量管线：整段一次合成，base64 返回给外部音频控件

use std::sync::Arc;
use std::time::Duration;

use voiceread::application::ports::{
    AudioSinkPort, SessionManagerPort, SpeechSynthesizerPort,
};
use voiceread::config::{load_config, print_config, PlaybackBackend, TtsBackend};
use voiceread::infrastructure::adapters::{
    DeviceAudioSink, DiscardAudioSink, FakeTtsClient, FakeTtsClientConfig, HttpTtsClient,
    HttpTtsClientConfig, PdfTextExtractor, ProcessTtsClient, ProcessTtsClientConfig,
};
use voiceread::infrastructure::http::{AppState, HttpServer, ServerConfig};
use voiceread::infrastructure::memory::InMemorySessionManager;
use voiceread::infrastructure::worker::PlaybackSupervisor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},voiceread={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("VoiceRead - PDF 朗读服务");
    print_config(&config);

    // 创建 PDF 提取器
    let extractor = Arc::new(PdfTextExtractor::new());

    // 按配置选择合成后端
    let synthesizer: Arc<dyn SpeechSynthesizerPort> = match config.tts.backend {
        TtsBackend::Remote => {
            let tts_config = HttpTtsClientConfig {
                base_url: config.tts.remote.url.clone(),
                timeout_secs: config.tts.remote.timeout_secs,
                language: config.tts.language.clone(),
                retry: config.tts.retry.policy(),
            };
            Arc::new(HttpTtsClient::new(tts_config)?)
        }
        TtsBackend::Local => {
            let tts_config = ProcessTtsClientConfig {
                engine: config.tts.local.engine.clone(),
                voice: config.tts.local.voice.clone(),
                speed_wpm: config.tts.local.speed_wpm,
            };
            Arc::new(ProcessTtsClient::new(tts_config))
        }
        TtsBackend::Fake => Arc::new(FakeTtsClient::new(FakeTtsClientConfig::default())),
    };

    // 按配置选择音频输出
    let sink: Arc<dyn AudioSinkPort> = match config.playback.backend {
        PlaybackBackend::Device => Arc::new(DeviceAudioSink::new()),
        PlaybackBackend::Discard => {
            Arc::new(DiscardAudioSink::new(config.playback.discard_clip_ms))
        }
    };

    // 创建内存 Session 管理器与播放监督者
    let sessions: Arc<dyn SessionManagerPort> = Arc::new(InMemorySessionManager::new());
    let supervisor = Arc::new(PlaybackSupervisor::new(
        synthesizer.clone(),
        sink.clone(),
        sessions.clone(),
    ));

    // 启动过期会话清理
    if config.gc.enabled {
        let gc_sessions = sessions.clone();
        let interval_secs = config.gc.interval_secs;
        let expire_secs = config.gc.session_expire_secs;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
            ticker.tick().await; // 第一次 tick 立即返回，跳过
            loop {
                ticker.tick().await;
                let expired = gc_sessions.get_expired_sessions(expire_secs);
                for session_id in expired {
                    if let Err(e) = gc_sessions.close(&session_id) {
                        tracing::warn!(session_id = %session_id, error = %e, "Session GC close failed");
                    } else {
                        tracing::info!(session_id = %session_id, "Expired session closed");
                    }
                }
            }
        });
    }

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_upload_size(config.server.max_upload_size);
    let state = AppState::new(sessions, extractor, synthesizer, supervisor.clone());

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    // 排空仍在播放的 worker 后退出
    supervisor.stop().await;

    tracing::info!("Server shutdown complete");

    Ok(())
}
