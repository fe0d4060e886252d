// =============================================================================
// INTEGRATION TESTS - METRICS ENDPOINTS
// =============================================================================

use axum_test::TestServer;
use homework_notifier::services::metrics::{MetricsRegistry, PollMetricsCollector};
use homework_notifier::modules::homework::PollCursor;

#[tokio::test]
async fn test_health_endpoint() {
    let metrics = MetricsRegistry::new().unwrap();
    let server = TestServer::new(homework_notifier::create_app(metrics)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_poll_counters() {
    let metrics = MetricsRegistry::new().unwrap();
    let collector = PollMetricsCollector::new(metrics.clone());
    collector.record_cycle("notified");
    collector.record_failure("fetch");
    collector.record_suppressed();
    collector.set_cursor(PollCursor::from_timestamp(1_700_000_000));

    let server = TestServer::new(homework_notifier::create_app(metrics)).unwrap();
    let response = server.get("/metrics").await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("homework_poll_cycles_total{outcome=\"notified\"} 1"));
    assert!(text.contains("homework_poll_failures_total{kind=\"fetch\"} 1"));
    assert!(text.contains("homework_log_messages_suppressed_total 1"));
    assert!(text.contains("homework_poll_cursor_timestamp 1700000000"));
}
