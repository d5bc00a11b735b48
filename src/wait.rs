//! Bounded polling shared by every wait in the crate

use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Call `probe` every `interval` until it yields `Some` or `ceiling` has elapsed
///
/// The probe always runs at least once, so a zero ceiling is a single check.
pub async fn poll_until<T, F, Fut>(interval: Duration, ceiling: Duration, mut probe: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let deadline = Instant::now() + ceiling;

    loop {
        if let Some(value) = probe().await {
            return Some(value);
        }

        let now = Instant::now();
        if now >= deadline {
            return None;
        }
        sleep(interval.min(deadline - now)).await;
    }
}

#[cfg(test)]
#[path = "wait_test.rs"]
mod wait_test;
