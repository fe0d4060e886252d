use async_trait::async_trait;
use axum::Router;
use serde_json::Value;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use homework_notifier::modules::homework::PollCursor;
use homework_notifier::services::logging::{ChatSink, ConsoleSink, DeduplicatingLogger};
use homework_notifier::services::metrics::{MetricsRegistry, PollMetricsCollector};
use homework_notifier::services::notify::{ChatTransport, Notifier, TransportError};
use homework_notifier::services::poller::{CursorPolicy, PollLoop, PollSettings};
use homework_notifier::services::practicum::{FetchError, StatusSource};

#[allow(dead_code)]
pub const USER_CHAT: &str = "user-chat";
#[allow(dead_code)]
pub const OPS_CHAT: &str = "ops-chat";
#[allow(dead_code)]
pub const START_CURSOR: i64 = 1_700_000_000;

// Helper to build a fetch failure with a stable message
#[allow(dead_code)]
pub fn connection_refused() -> FetchError {
    FetchError::Network {
        endpoint: "https://practicum.test/api/user_api/homework_statuses/".to_string(),
        reason: "error sending request: connection refused".to_string(),
    }
}

/// Status source replaying a fixed script of responses.
#[allow(dead_code)]
#[derive(Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Value, FetchError>>>,
    cursors: Mutex<Vec<PollCursor>>,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new(responses: Vec<Result<Value, FetchError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            cursors: Mutex::new(Vec::new()),
        })
    }

    pub fn cursors(&self) -> Vec<PollCursor> {
        self.cursors.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusSource for ScriptedSource {
    async fn fetch(&self, cursor: PollCursor) -> Result<Value, FetchError> {
        self.cursors.lock().unwrap().push(cursor);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(serde_json::json!({"homeworks": []})))
    }
}

/// Chat transport that records messages and can be switched to failing.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(String, String)>>,
    failing: AtomicBool,
}

#[allow(dead_code)]
impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, chat_id: &str) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(chat, _)| chat == chat_id)
            .map(|(_, text)| text)
            .collect()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    fn name(&self) -> &'static str {
        "Telegram"
    }

    async fn send_text(&self, chat_id: &str, text: &str) -> Result<(), TransportError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TransportError("Bot API returned HTTP 502: Bad Gateway".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), text.to_string()));
        Ok(())
    }
}

// Allow dead_code for utilities used by other test files
#[allow(dead_code)]
pub struct TestLoop {
    pub poll_loop: PollLoop,
    pub source: Arc<ScriptedSource>,
    pub transport: Arc<RecordingTransport>,
    pub metrics: Arc<MetricsRegistry>,
}

#[allow(dead_code)]
impl TestLoop {
    pub fn new(responses: Vec<Result<Value, FetchError>>) -> Self {
        Self::with_settings(responses, PollSettings::new(USER_CHAT))
    }

    pub fn with_policy(responses: Vec<Result<Value, FetchError>>, policy: CursorPolicy) -> Self {
        let mut settings = PollSettings::new(USER_CHAT);
        settings.cursor_policy = policy;
        Self::with_settings(responses, settings)
    }

    pub fn with_settings(responses: Vec<Result<Value, FetchError>>, settings: PollSettings) -> Self {
        let source = ScriptedSource::new(responses);
        let transport = RecordingTransport::new();
        let metrics = MetricsRegistry::new().expect("Failed to create metrics registry");

        let notifier = Notifier::new(transport.clone());
        let logger = DeduplicatingLogger::default()
            .with_sink(Box::new(ConsoleSink))
            .with_sink(Box::new(ChatSink::new(notifier.clone(), OPS_CHAT)));

        let poll_loop = PollLoop::new(
            source.clone(),
            notifier,
            logger,
            PollMetricsCollector::new(metrics.clone()),
            settings,
            PollCursor::from_timestamp(START_CURSOR),
        );

        Self {
            poll_loop,
            source,
            transport,
            metrics,
        }
    }
}

// Helper to serve a stub API on an ephemeral local port
#[allow(dead_code)]
pub async fn spawn_stub(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub server");
    let addr = listener.local_addr().expect("Stub server has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    addr
}
