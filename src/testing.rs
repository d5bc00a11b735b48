// In-memory driver used by the unit tests

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

use crate::config::SessionConfig;
use crate::driver::{Driver, Launcher};
use crate::types::Selector;

/// Element registered with the fake DOM
#[derive(Clone, Debug)]
pub struct FakeElement {
    pub label: String,
    matches: Vec<Selector>,
    visible: bool,
    enabled: bool,
    appears_after: Duration,
}

impl FakeElement {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            matches: Vec::new(),
            visible: true,
            enabled: true,
            appears_after: Duration::ZERO,
        }
    }

    pub fn matching(mut self, selector: Selector) -> Self {
        self.matches.push(selector);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn appearing_after(mut self, delay: Duration) -> Self {
        self.appears_after = delay;
        self
    }
}

struct Registered {
    element: FakeElement,
    appears_at: Instant,
}

#[derive(Default)]
struct FakeState {
    elements: Vec<Registered>,
    failing: HashSet<Selector>,
    find_calls: Vec<Selector>,
    visited: Vec<String>,
    clicks: Vec<usize>,
    clears: Vec<usize>,
    keys: Vec<(usize, String)>,
    quits: usize,
    fail_quit: bool,
}

#[derive(Clone, Default)]
pub struct FakeDriver {
    state: Arc<Mutex<FakeState>>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, element: FakeElement) -> usize {
        let mut state = self.state.lock().unwrap();
        let appears_at = Instant::now() + element.appears_after;
        state.elements.push(Registered {
            element,
            appears_at,
        });
        state.elements.len() - 1
    }

    /// Make every lookup of `selector` fail at the driver level
    pub fn fail_lookups(&self, selector: Selector) {
        self.state.lock().unwrap().failing.insert(selector);
    }

    pub fn fail_quit(&self) {
        self.state.lock().unwrap().fail_quit = true;
    }

    pub fn find_calls(&self, selector: &Selector) -> usize {
        let state = self.state.lock().unwrap();
        state.find_calls.iter().filter(|s| *s == selector).count()
    }

    pub fn visited(&self) -> Vec<String> {
        self.state.lock().unwrap().visited.clone()
    }

    pub fn clicked_labels(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .clicks
            .iter()
            .map(|id| state.elements[*id].element.label.clone())
            .collect()
    }

    pub fn cleared(&self, id: usize) -> bool {
        self.state.lock().unwrap().clears.contains(&id)
    }

    pub fn keys_sent_to(&self, id: usize) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .keys
            .iter()
            .filter(|(target, _)| *target == id)
            .map(|(_, keys)| keys.clone())
            .collect()
    }

    pub fn all_keys(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.keys.iter().map(|(_, keys)| keys.clone()).collect()
    }

    pub fn quits(&self) -> usize {
        self.state.lock().unwrap().quits
    }
}

#[async_trait]
impl Driver for FakeDriver {
    type Element = usize;

    async fn goto(&self, url: &str) -> Result<()> {
        self.state.lock().unwrap().visited.push(url.to_string());
        Ok(())
    }

    async fn find_all(&self, selector: &Selector) -> Result<Vec<usize>> {
        let mut state = self.state.lock().unwrap();
        state.find_calls.push(selector.clone());
        if state.failing.contains(selector) {
            anyhow::bail!("stale element reference");
        }

        let now = Instant::now();
        Ok(state
            .elements
            .iter()
            .enumerate()
            .filter(|(_, r)| r.appears_at <= now && r.element.matches.contains(selector))
            .map(|(id, _)| id)
            .collect())
    }

    async fn is_displayed(&self, element: &usize) -> Result<bool> {
        Ok(self.state.lock().unwrap().elements[*element].element.visible)
    }

    async fn is_enabled(&self, element: &usize) -> Result<bool> {
        Ok(self.state.lock().unwrap().elements[*element].element.enabled)
    }

    async fn click(&self, element: &usize) -> Result<()> {
        self.state.lock().unwrap().clicks.push(*element);
        Ok(())
    }

    async fn clear(&self, element: &usize) -> Result<()> {
        self.state.lock().unwrap().clears.push(*element);
        Ok(())
    }

    async fn send_keys(&self, element: &usize, keys: &str) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .keys
            .push((*element, keys.to_string()));
        Ok(())
    }

    async fn quit(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.quits += 1;
        if state.fail_quit {
            anyhow::bail!("browser already gone");
        }
        Ok(())
    }
}

/// Launcher that hands out a shared fake driver
#[derive(Clone, Default)]
pub struct FakeLauncher {
    pub driver: FakeDriver,
    launches: Arc<Mutex<usize>>,
}

impl FakeLauncher {
    pub fn new(driver: FakeDriver) -> Self {
        Self {
            driver,
            launches: Arc::default(),
        }
    }

    pub fn launches(&self) -> usize {
        *self.launches.lock().unwrap()
    }
}

#[async_trait]
impl Launcher for FakeLauncher {
    type Driver = FakeDriver;

    async fn launch(&self, _config: &SessionConfig) -> Result<FakeDriver> {
        *self.launches.lock().unwrap() += 1;
        Ok(self.driver.clone())
    }
}
