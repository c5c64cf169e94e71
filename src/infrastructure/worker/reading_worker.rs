//! Reading Worker - 句子队列播放
//!
//! 生产者把句子按源顺序写入 FIFO 队列，唯一的消费者逐句
//! 合成并播放，播放完成后才取下一句 —— 保证句子严格有序、
//! 播放互不重叠。
//!
//! 取消只有一条路径：向队列写入 Stop 哨兵并等待 worker 退出
//! （drain-then-replace），不中断正在播放的片段，也不强杀任务

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::application::ports::{AudioSinkPort, SessionManagerPort, SpeechSynthesizerPort};
use crate::domain::{ReadingState, SentenceUnit};

/// 队列元素
#[derive(Debug)]
pub enum QueueItem {
    Sentence(SentenceUnit),
    /// 终止哨兵，结束消费循环（每个 worker 生命周期恰好消费一次）
    Stop,
}

/// 句子队列消费者
pub struct ReadingWorker {
    session_id: String,
    queue: mpsc::UnboundedReceiver<QueueItem>,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    sink: Arc<dyn AudioSinkPort>,
    sessions: Arc<dyn SessionManagerPort>,
}

impl ReadingWorker {
    /// 消费循环
    ///
    /// 逐句：合成 -> 播放到结束 -> 推进索引。单句失败只记录日志并
    /// 跳到下一句，不终止队列，也不会静默挂起
    pub async fn run(mut self) {
        tracing::info!(session_id = %self.session_id, "Reading worker started");

        let mut playing = false;
        while let Some(item) = self.queue.recv().await {
            let sentence = match item {
                QueueItem::Stop => {
                    tracing::info!(session_id = %self.session_id, "Stop sentinel received");
                    break;
                }
                QueueItem::Sentence(sentence) => sentence,
            };

            if !playing {
                if let Err(e) = self.sessions.set_state(&self.session_id, ReadingState::Playing)
                {
                    tracing::warn!(session_id = %self.session_id, error = %e, "Failed to mark session playing");
                }
                playing = true;
            }

            let clip = match self.synthesizer.synthesize(&sentence.text).await {
                Ok(clip) => clip,
                Err(e) => {
                    tracing::warn!(
                        session_id = %self.session_id,
                        sentence_index = sentence.index,
                        error = %e,
                        "Sentence synthesis failed, skipping"
                    );
                    continue;
                }
            };

            if let Err(e) = self.sink.play(&clip).await {
                tracing::warn!(
                    session_id = %self.session_id,
                    sentence_index = sentence.index,
                    error = %e,
                    "Sentence playback failed, skipping"
                );
                continue;
            }

            let _ = self.sessions.advance(&self.session_id, sentence.index + 1);
        }

        // 会话可能已被替换请求关闭
        if self.sessions.is_valid(&self.session_id) {
            if let Err(e) = self.sessions.set_state(&self.session_id, ReadingState::Idle) {
                tracing::warn!(session_id = %self.session_id, error = %e, "Failed to mark session idle");
            }
        }

        tracing::info!(session_id = %self.session_id, "Reading worker exited");
    }
}

/// 活动 worker 的句柄
struct ActiveWorker {
    session_id: String,
    queue: mpsc::UnboundedSender<QueueItem>,
    handle: JoinHandle<()>,
}

/// 播放监督者
///
/// 持有至多一个活动 worker。音频输出设备进程级独占，
/// 新 worker 启动前必须等旧 worker 完全退出
pub struct PlaybackSupervisor {
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    sink: Arc<dyn AudioSinkPort>,
    sessions: Arc<dyn SessionManagerPort>,
    active: Mutex<Option<ActiveWorker>>,
}

impl PlaybackSupervisor {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        sink: Arc<dyn AudioSinkPort>,
        sessions: Arc<dyn SessionManagerPort>,
    ) -> Self {
        Self {
            synthesizer,
            sink,
            sessions,
            active: Mutex::new(None),
        }
    }

    /// 启动新的朗读：排空旧 worker（若有），再起一个消费者并按序入队
    pub async fn begin(&self, session_id: &str, sentences: Vec<SentenceUnit>) {
        let mut active = self.active.lock().await;
        Self::drain(&mut active).await;

        let (tx, rx) = mpsc::unbounded_channel();
        let worker = ReadingWorker {
            session_id: session_id.to_string(),
            queue: rx,
            synthesizer: self.synthesizer.clone(),
            sink: self.sink.clone(),
            sessions: self.sessions.clone(),
        };
        let handle = tokio::spawn(worker.run());

        let total = sentences.len();
        for sentence in sentences {
            // worker 持有接收端，send 仅在 worker 提前退出时失败
            let _ = tx.send(QueueItem::Sentence(sentence));
        }

        tracing::info!(session_id = %session_id, sentences = total, "Reading started");

        *active = Some(ActiveWorker {
            session_id: session_id.to_string(),
            queue: tx,
            handle,
        });
    }

    /// 停止当前朗读（若有），返回是否有 worker 被排空
    pub async fn stop(&self) -> bool {
        let mut active = self.active.lock().await;
        Self::drain(&mut active).await
    }

    /// 仅当指定会话是当前活动会话时停止，避免误停后来者
    pub async fn stop_session(&self, session_id: &str) -> bool {
        let mut active = self.active.lock().await;
        if active.as_ref().map(|w| w.session_id.as_str()) == Some(session_id) {
            Self::drain(&mut active).await
        } else {
            false
        }
    }

    /// 当前活动会话 ID
    pub async fn active_session(&self) -> Option<String> {
        self.active.lock().await.as_ref().map(|w| w.session_id.clone())
    }

    /// 写入哨兵并等待 worker 退出（协作式，不强杀）
    async fn drain(active: &mut Option<ActiveWorker>) -> bool {
        let Some(worker) = active.take() else {
            return false;
        };

        tracing::info!(session_id = %worker.session_id, "Draining previous reading worker");
        let _ = worker.queue.send(QueueItem::Stop);
        if let Err(e) = worker.handle.await {
            tracing::error!(session_id = %worker.session_id, error = %e, "Reading worker task failed");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        AudioClip, PlaybackError, SynthesisError,
    };
    use crate::infrastructure::memory::InMemorySessionManager;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    /// 记录调用顺序的合成器，可对指定文本返回失败
    struct ScriptedSynthesizer {
        log: Arc<std::sync::Mutex<Vec<String>>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl SpeechSynthesizerPort for ScriptedSynthesizer {
        async fn synthesize(&self, text: &str) -> Result<AudioClip, SynthesisError> {
            self.log.lock().unwrap().push(format!("synth:{}", text));
            if self.fail_on.as_deref() == Some(text) {
                return Err(SynthesisError::Failure("scripted failure".into()));
            }
            let mut clip = AudioClip::new(text.as_bytes().to_vec(), "audio/wav");
            clip.duration_ms = Some(1);
            Ok(clip)
        }
    }

    /// 记录播放顺序并检测重叠的输出
    struct RecordingSink {
        log: Arc<std::sync::Mutex<Vec<String>>>,
        in_flight: AtomicBool,
        overlapped: Arc<AtomicBool>,
    }

    #[async_trait]
    impl AudioSinkPort for RecordingSink {
        async fn play(&self, clip: &AudioClip) -> Result<(), PlaybackError> {
            if self.in_flight.swap(true, Ordering::SeqCst) {
                self.overlapped.store(true, Ordering::SeqCst);
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.log
                .lock()
                .unwrap()
                .push(format!("play:{}", String::from_utf8_lossy(&clip.data)));
            self.in_flight.store(false, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Harness {
        supervisor: PlaybackSupervisor,
        sessions: Arc<InMemorySessionManager>,
        log: Arc<std::sync::Mutex<Vec<String>>>,
        overlapped: Arc<AtomicBool>,
    }

    fn harness(fail_on: Option<&str>) -> Harness {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let overlapped = Arc::new(AtomicBool::new(false));
        let sessions = Arc::new(InMemorySessionManager::new());

        let synthesizer = Arc::new(ScriptedSynthesizer {
            log: log.clone(),
            fail_on: fail_on.map(String::from),
        });
        let sink = Arc::new(RecordingSink {
            log: log.clone(),
            in_flight: AtomicBool::new(false),
            overlapped: overlapped.clone(),
        });

        Harness {
            supervisor: PlaybackSupervisor::new(synthesizer, sink, sessions.clone()),
            sessions,
            log,
            overlapped,
        }
    }

    /// 建一个已入队状态的会话
    fn queued_session(sessions: &InMemorySessionManager, total: usize) -> String {
        let id = sessions.create(crate::domain::ReadingSession::new()).unwrap();
        sessions.set_state(&id, ReadingState::Extracting).unwrap();
        sessions.set_state(&id, ReadingState::Queued).unwrap();
        sessions.set_total(&id, total).unwrap();
        id
    }

    fn sentences(texts: &[&str]) -> Vec<SentenceUnit> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| SentenceUnit::new(i, *t))
            .collect()
    }

    fn played(log: &std::sync::Mutex<Vec<String>>) -> Vec<String> {
        log.lock()
            .unwrap()
            .iter()
            .filter(|e| e.starts_with("play:"))
            .cloned()
            .collect()
    }

    #[tokio::test]
    async fn test_sentences_played_in_fifo_order() {
        let h = harness(None);
        let session_id = queued_session(&h.sessions, 3);

        h.supervisor
            .begin(&session_id, sentences(&["one", "two", "three"]))
            .await;
        h.supervisor.stop().await;

        assert_eq!(
            played(&h.log),
            vec!["play:one", "play:two", "play:three"]
        );
        assert!(!h.overlapped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_synthesize_precedes_each_play_without_overlap() {
        let h = harness(None);
        let session_id = queued_session(&h.sessions, 2);

        h.supervisor.begin(&session_id, sentences(&["a", "b"])).await;
        h.supervisor.stop().await;

        let log = h.log.lock().unwrap().clone();
        assert_eq!(log, vec!["synth:a", "play:a", "synth:b", "play:b"]);
    }

    #[tokio::test]
    async fn test_replacing_drains_previous_worker_first() {
        let h = harness(None);
        let first = queued_session(&h.sessions, 2);
        let second = queued_session(&h.sessions, 1);

        h.supervisor.begin(&first, sentences(&["a1", "a2"])).await;
        h.supervisor.begin(&second, sentences(&["b1"])).await;
        assert_eq!(h.supervisor.active_session().await, Some(second.clone()));
        h.supervisor.stop().await;

        // 旧队列排空后新队列才开始，任一时刻只有一个 worker 在播
        assert_eq!(played(&h.log), vec!["play:a1", "play:a2", "play:b1"]);
        assert!(!h.overlapped.load(Ordering::SeqCst));

        // 被替换的会话回到 Idle
        assert_eq!(
            h.sessions.get(&first).unwrap().state,
            ReadingState::Idle
        );
    }

    #[tokio::test]
    async fn test_failed_sentence_is_skipped_not_fatal() {
        let h = harness(Some("bad"));
        let session_id = queued_session(&h.sessions, 3);

        h.supervisor
            .begin(&session_id, sentences(&["good", "bad", "last"]))
            .await;
        h.supervisor.stop().await;

        // 失败句只被跳过，后续句子继续播放
        assert_eq!(played(&h.log), vec!["play:good", "play:last"]);
    }

    #[tokio::test]
    async fn test_worker_updates_session_state_and_index() {
        let h = harness(None);
        let session_id = queued_session(&h.sessions, 2);

        h.supervisor.begin(&session_id, sentences(&["x", "y"])).await;
        h.supervisor.stop().await;

        let session = h.sessions.get(&session_id).unwrap();
        assert_eq!(session.state, ReadingState::Idle);
        assert_eq!(session.current_index, 2);
    }

    #[tokio::test]
    async fn test_stop_without_active_worker_is_noop() {
        let h = harness(None);
        assert!(!h.supervisor.stop().await);
        assert_eq!(h.supervisor.active_session().await, None);
    }
}
