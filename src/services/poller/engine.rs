use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::cursor::CursorPolicy;
use super::error::{failure_message, PollError};
use crate::modules::homework::{PollCursor, Submission};
use crate::services::homework::{current_date, validate, CheckedResponse, StatusParser};
use crate::services::logging::{DeduplicatingLogger, Severity};
use crate::services::metrics::PollMetricsCollector;
use crate::services::notify::Notifier;
use crate::services::practicum::StatusSource;

pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
pub struct PollSettings {
    /// Chat receiving status notifications.
    pub destination: String,
    pub retry_period: Duration,
    pub cursor_policy: CursorPolicy,
}

impl PollSettings {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            retry_period: DEFAULT_RETRY_PERIOD,
            cursor_policy: CursorPolicy::default(),
        }
    }
}

/// What a single poll cycle ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Notified,
    Unchanged,
    NoSubmissions,
    Failed {
        kind: &'static str,
        message: String,
        /// `false` when the logger dropped the message as repeated or muted
        reported: bool,
    },
}

impl CycleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notified => "notified",
            Self::Unchanged => "unchanged",
            Self::NoSubmissions => "no_submissions",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Fetch -> validate -> compare -> notify -> sleep, forever.
pub struct PollLoop {
    source: Arc<dyn StatusSource>,
    notifier: Notifier,
    parser: StatusParser,
    logger: DeduplicatingLogger,
    metrics: PollMetricsCollector,
    settings: PollSettings,
    cursor: PollCursor,
    last_seen: Option<Submission>,
}

impl PollLoop {
    pub fn new(
        source: Arc<dyn StatusSource>,
        notifier: Notifier,
        logger: DeduplicatingLogger,
        metrics: PollMetricsCollector,
        settings: PollSettings,
        start_cursor: PollCursor,
    ) -> Self {
        metrics.set_cursor(start_cursor);
        Self {
            source,
            notifier,
            parser: StatusParser::default(),
            logger,
            metrics,
            settings,
            cursor: start_cursor,
            last_seen: None,
        }
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    pub fn last_seen(&self) -> Option<&Submission> {
        self.last_seen.as_ref()
    }

    /// Runs cycles until `shutdown` resolves. A cycle in progress is always
    /// finished; only the sleep between cycles is cut short.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        tracing::info!(
            cursor = %self.cursor,
            period_secs = self.settings.retry_period.as_secs(),
            "Poll loop started"
        );

        loop {
            let outcome = self.run_cycle().await;
            tracing::debug!(outcome = outcome.as_str(), "Poll cycle finished");

            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.settings.retry_period) => {}
            }
        }

        tracing::info!("Poll loop stopped");
    }

    /// One cycle without the trailing sleep. Never fails: errors are
    /// reported through the logger and returned as [`CycleOutcome::Failed`].
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let outcome = match self.poll_once().await {
            Ok(outcome) => outcome,
            Err(err) => self.handle_failure(err).await,
        };
        self.metrics.record_cycle(outcome.as_str());
        outcome
    }

    async fn poll_once(&mut self) -> Result<CycleOutcome, PollError> {
        let fetch_started_at = PollCursor::now();
        let payload = self.source.fetch(self.cursor).await?;
        tracing::debug!(cursor = %self.cursor, "Homework API request succeeded");

        let checked = validate(&payload)?;
        self.advance_cursor(current_date(&payload), fetch_started_at);

        let submission = match checked {
            CheckedResponse::Latest(submission) => submission,
            CheckedResponse::Empty => {
                tracing::warn!("Homework API response contains no submissions");
                return Ok(CycleOutcome::NoSubmissions);
            }
        };

        if self.last_seen.as_ref() == Some(&submission) {
            tracing::debug!("No new homework statuses");
            return Ok(CycleOutcome::Unchanged);
        }

        // The change counts as consumed even if parsing or delivery fails below
        let submission = self.last_seen.insert(submission);

        let text = self.parser.parse(submission)?;
        self.notifier.notify(&self.settings.destination, &text).await?;
        self.metrics.record_notification();
        tracing::info!(homework = %submission.name, status = %submission.status, "Status change delivered");

        Ok(CycleOutcome::Notified)
    }

    fn advance_cursor(&mut self, server_date: Option<i64>, fetch_started_at: PollCursor) {
        let next = self
            .settings
            .cursor_policy
            .next(self.cursor, server_date, fetch_started_at);
        if next != self.cursor {
            tracing::debug!(from = %self.cursor, to = %next, "Poll cursor advanced");
            self.cursor = next;
            self.metrics.set_cursor(next);
        }
    }

    async fn handle_failure(&mut self, err: PollError) -> CycleOutcome {
        let kind = err.kind();
        let message = failure_message(&err);
        self.metrics.record_failure(kind);

        let reported = self.logger.report(&message, Severity::Error).await;
        if !reported {
            self.metrics.record_suppressed();
        }

        CycleOutcome::Failed {
            kind,
            message,
            reported,
        }
    }
}
