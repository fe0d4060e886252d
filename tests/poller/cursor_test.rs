// =============================================================================
// INTEGRATION TESTS - POLL CURSOR
// =============================================================================

use crate::common::{connection_refused, TestLoop, START_CURSOR};
use homework_notifier::modules::homework::PollCursor;
use homework_notifier::services::poller::CursorPolicy;
use serde_json::json;

fn at(secs: i64) -> PollCursor {
    PollCursor::from_timestamp(secs)
}

#[tokio::test]
async fn test_cursor_follows_server_date() {
    let mut t = TestLoop::new(vec![
        Ok(json!({"homeworks": [], "current_date": START_CURSOR + 600})),
        Ok(json!({"homeworks": [], "current_date": START_CURSOR + 1200})),
    ]);

    t.poll_loop.run_cycle().await;
    t.poll_loop.run_cycle().await;

    assert_eq!(t.source.cursors(), vec![at(START_CURSOR), at(START_CURSOR + 600)]);
    assert_eq!(t.poll_loop.cursor(), at(START_CURSOR + 1200));
}

#[tokio::test]
async fn test_cursor_uses_local_clock_without_server_date() {
    let mut t = TestLoop::new(vec![Ok(json!({"homeworks": []}))]);
    let before = PollCursor::now();

    t.poll_loop.run_cycle().await;

    assert!(t.poll_loop.cursor() >= before);
}

#[tokio::test]
async fn test_cursor_never_moves_back() {
    let mut t = TestLoop::new(vec![
        Ok(json!({"homeworks": [], "current_date": START_CURSOR + 600})),
        Ok(json!({"homeworks": [], "current_date": START_CURSOR - 600})),
    ]);

    t.poll_loop.run_cycle().await;
    t.poll_loop.run_cycle().await;

    assert_eq!(t.poll_loop.cursor(), at(START_CURSOR + 600));
}

#[tokio::test]
async fn test_cursor_holds_on_failures() {
    let mut t = TestLoop::new(vec![
        Err(connection_refused()),
        Ok(json!({"homework": [], "current_date": START_CURSOR + 600})),
    ]);

    t.poll_loop.run_cycle().await;
    t.poll_loop.run_cycle().await;

    assert_eq!(t.poll_loop.cursor(), at(START_CURSOR));
    assert_eq!(t.source.cursors(), vec![at(START_CURSOR), at(START_CURSOR)]);
}

#[tokio::test]
async fn test_fixed_cursor_policy() {
    let mut t = TestLoop::with_policy(
        vec![
            Ok(json!({"homeworks": [{"name": "hw1", "status": "reviewing"}], "current_date": START_CURSOR + 600})),
            Ok(json!({"homeworks": [{"name": "hw1", "status": "approved"}], "current_date": START_CURSOR + 1200})),
        ],
        CursorPolicy::Fixed,
    );

    t.poll_loop.run_cycle().await;
    t.poll_loop.run_cycle().await;

    assert_eq!(t.source.cursors(), vec![at(START_CURSOR), at(START_CURSOR)]);
    assert_eq!(t.poll_loop.cursor(), at(START_CURSOR));
}
