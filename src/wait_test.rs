use super::*;
use std::cell::Cell;

#[tokio::test(start_paused = true)]
async fn test_returns_first_success() {
    let calls = Cell::new(0);
    let calls_ref = &calls;

    let result = poll_until(Duration::from_millis(100), Duration::from_secs(5), move || async move {
        calls_ref.set(calls_ref.get() + 1);
        (calls_ref.get() == 3).then_some("ready")
    })
    .await;

    assert_eq!(result, Some("ready"));
    assert_eq!(calls.get(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_gives_up_at_ceiling() {
    let start = Instant::now();

    let result: Option<()> =
        poll_until(Duration::from_millis(250), Duration::from_secs(2), || async { None }).await;

    assert!(result.is_none());
    assert_eq!(start.elapsed(), Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn test_zero_ceiling_probes_once() {
    let calls = Cell::new(0);
    let calls_ref = &calls;

    let result: Option<()> = poll_until(Duration::from_millis(100), Duration::ZERO, move || async move {
        calls_ref.set(calls_ref.get() + 1);
        None
    })
    .await;

    assert!(result.is_none());
    assert_eq!(calls.get(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_success_after_delay() {
    let start = Instant::now();
    let appears_at = start + Duration::from_secs(5);

    let result = poll_until(Duration::from_millis(500), Duration::from_secs(60), move || async move {
        (Instant::now() >= appears_at).then_some(())
    })
    .await;

    assert!(result.is_some());
    assert!(start.elapsed() >= Duration::from_secs(5));
    assert!(start.elapsed() < Duration::from_secs(6));
}
