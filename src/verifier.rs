//! Best-effort delivery check against the rendered conversation

use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::driver::Driver;
use crate::selectors;
use crate::session::Session;
use crate::types::{Role, SentRecord};
use crate::wait::poll_until;

/// Look for an outgoing bubble containing `record.text` until `timeout`
///
/// A miss returns `false`, not an error: the confirmation markup may have
/// drifted while the message itself went out.
pub async fn verify<D: Driver>(session: &Session<D>, record: &SentRecord, timeout: Duration) -> bool {
    let driver = session.driver();
    let patterns = selectors::sent_confirmation(&record.text);
    let patterns = &patterns;

    let found = poll_until(
        session.timeouts().poll_interval,
        timeout,
        move || async move {
            for pattern in patterns {
                match driver.find_all(pattern).await {
                    Ok(elements) if !elements.is_empty() => return Some(pattern.clone()),
                    Ok(_) => {}
                    Err(e) => debug!("{} lookup {} failed: {:#}", Role::SentConfirmation, pattern, e),
                }
            }
            None
        },
    )
    .await;

    match found {
        Some(pattern) => {
            info!(
                "Located {} via {} ({:?} after send)",
                Role::SentConfirmation,
                pattern,
                Instant::now().saturating_duration_since(record.sent_at)
            );
            true
        }
        None => {
            warn!(
                "No {} on {} within {:?}",
                Role::SentConfirmation,
                session.url(),
                timeout
            );
            false
        }
    }
}

#[cfg(test)]
#[path = "verifier_test.rs"]
mod verifier_test;
