//! Layered element lookup: exact selectors first, structural scan last
//!
//! The chat application's markup is not a stable contract. Each role carries
//! an ordered list of exact selectors that are each given a short bounded
//! wait; when all of them miss, one scan over a broad structural pattern picks
//! a visible element by position. Driver errors on individual lookups count as
//! misses and never escape; only an exhausted [`LocatorSpec`] becomes
//! [`ChatError::NotFound`].

use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::driver::Driver;
use crate::errors::ChatError;
use crate::types::{Fallback, LocatorSpec, Pick, Selector};
use crate::wait::poll_until;

/// Result of one lookup stage
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<E> {
    Found(E),
    Exhausted,
}

impl<E> Lookup<E> {
    pub fn found(self) -> Option<E> {
        match self {
            Lookup::Found(element) => Some(element),
            Lookup::Exhausted => None,
        }
    }
}

/// Resolve the element for `spec` within `timeout`
pub async fn locate<D: Driver>(
    driver: &D,
    spec: &LocatorSpec,
    timeout: Duration,
    interval: Duration,
) -> Result<D::Element, ChatError> {
    debug!("Locating {} ({} candidates)", spec.role, spec.candidates.len());

    if let Lookup::Found(element) = try_candidates(driver, spec, timeout, interval).await {
        return Ok(element);
    }

    if let Some(fallback) = &spec.fallback
        && let Some(element) = scan_fallback(driver, fallback).await.found()
    {
        warn!(
            "Using structural fallback {} for {}; the match may be imprecise",
            fallback.pattern, spec.role
        );
        return Ok(element);
    }

    Err(ChatError::NotFound { role: spec.role })
}

/// Give each candidate its share of the budget, in declared order
pub async fn try_candidates<D: Driver>(
    driver: &D,
    spec: &LocatorSpec,
    timeout: Duration,
    interval: Duration,
) -> Lookup<D::Element> {
    let deadline = Instant::now() + timeout;

    for selector in &spec.candidates {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let budget = spec.per_attempt.min(remaining);

        if let Some(element) = wait_for_interactable(driver, selector, budget, interval).await {
            info!("Located {} via {}", spec.role, selector);
            return Lookup::Found(element);
        }
        debug!("No interactable {} for {} within {:?}", spec.role, selector, budget);
    }

    Lookup::Exhausted
}

/// Single pass over every element matching the broad pattern
pub async fn scan_fallback<D: Driver>(driver: &D, fallback: &Fallback) -> Lookup<D::Element> {
    let mut elements = match driver.find_all(&fallback.pattern).await {
        Ok(elements) => elements,
        Err(e) => {
            debug!("Fallback scan {} failed: {:#}", fallback.pattern, e);
            return Lookup::Exhausted;
        }
    };

    if fallback.pick == Pick::Last {
        elements.reverse();
    }

    for element in elements {
        if driver.is_displayed(&element).await.unwrap_or(false) {
            return Lookup::Found(element);
        }
    }

    Lookup::Exhausted
}

/// Wait for an element that is present, visible and enabled
pub async fn wait_for_interactable<D: Driver>(
    driver: &D,
    selector: &Selector,
    ceiling: Duration,
    interval: Duration,
) -> Option<D::Element> {
    poll_until(interval, ceiling, move || first_interactable(driver, selector)).await
}

/// Wait for any element matching `selector`, visible or not
pub async fn wait_for_presence<D: Driver>(
    driver: &D,
    selector: &Selector,
    ceiling: Duration,
    interval: Duration,
) -> Option<D::Element> {
    poll_until(interval, ceiling, move || async move {
        match driver.find_all(selector).await {
            Ok(elements) => elements.into_iter().next(),
            Err(e) => {
                debug!("Lookup {} failed: {:#}", selector, e);
                None
            }
        }
    })
    .await
}

async fn first_interactable<D: Driver>(driver: &D, selector: &Selector) -> Option<D::Element> {
    let elements = match driver.find_all(selector).await {
        Ok(elements) => elements,
        Err(e) => {
            debug!("Lookup {} failed: {:#}", selector, e);
            return None;
        }
    };

    for element in elements {
        let displayed = driver.is_displayed(&element).await.unwrap_or(false);
        if displayed && driver.is_enabled(&element).await.unwrap_or(false) {
            return Some(element);
        }
    }

    None
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod locator_test;
