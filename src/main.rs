use std::process::ExitCode;
use std::sync::Arc;

use homework_notifier::config::Config;
use homework_notifier::modules::homework::PollCursor;
use homework_notifier::services::logging::{ChatSink, ConsoleSink, DeduplicatingLogger};
use homework_notifier::services::metrics::{MetricsRegistry, PollMetricsCollector};
use homework_notifier::services::notify::{Notifier, TelegramClient};
use homework_notifier::services::poller::{PollLoop, PollSettings};
use homework_notifier::services::practicum::PracticumClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homework_notifier=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting homework notifier");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(critical = true, "Environment configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!("Environment variables loaded");

    let metrics = match MetricsRegistry::new() {
        Ok(metrics) => metrics,
        Err(e) => {
            tracing::error!("Failed to initialise metrics: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(addr) = config.metrics_addr {
        let listener = match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!("Failed to bind metrics server on {}: {}", addr, e);
                return ExitCode::FAILURE;
            }
        };
        let app = homework_notifier::create_app(metrics.clone());
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Metrics server stopped: {}", e);
            }
        });
        tracing::info!("Metrics server running on http://{}", addr);
    }

    let source = Arc::new(PracticumClient::new(
        config.practicum_endpoint.clone(),
        config.practicum_token.clone(),
        config.request_timeout,
    ));
    let transport = Arc::new(TelegramClient::new(
        &config.telegram_api_url,
        &config.telegram_token,
        config.request_timeout,
    ));
    let notifier = Notifier::new(transport);

    let logger = DeduplicatingLogger::new(config.log_mute_substring.as_deref())
        .with_sink(Box::new(ConsoleSink))
        .with_sink(Box::new(ChatSink::new(notifier.clone(), config.ops_chat_id.clone())));

    let settings = PollSettings {
        destination: config.telegram_chat_id.clone(),
        retry_period: config.retry_period,
        cursor_policy: config.cursor_policy,
    };

    let mut poll_loop = PollLoop::new(
        source,
        notifier,
        logger,
        PollMetricsCollector::new(metrics),
        settings,
        PollCursor::now(),
    );

    poll_loop
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Cannot listen for Ctrl-C, running until killed: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    tracing::info!("Homework notifier stopped");
    ExitCode::SUCCESS
}
