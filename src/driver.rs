//! Browser capability surface the automation steps depend on

use anyhow::Result;
use async_trait::async_trait;

use crate::config::SessionConfig;
use crate::types::Selector;

/// Minimal browser-automation surface
///
/// The locator, composer and verifier only talk to this trait, so any
/// WebDriver (or an in-memory fake) can stand behind a session.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Handle to a DOM element
    type Element: Clone + Send + Sync;

    async fn goto(&self, url: &str) -> Result<()>;

    /// Every element matching `selector`, in document order. No match is an empty list.
    async fn find_all(&self, selector: &Selector) -> Result<Vec<Self::Element>>;

    async fn is_displayed(&self, element: &Self::Element) -> Result<bool>;

    async fn is_enabled(&self, element: &Self::Element) -> Result<bool>;

    async fn click(&self, element: &Self::Element) -> Result<()>;

    async fn clear(&self, element: &Self::Element) -> Result<()>;

    /// Send a key sequence (W3C WebDriver code points) to the element
    async fn send_keys(&self, element: &Self::Element, keys: &str) -> Result<()>;

    /// End the browser session
    async fn quit(&self) -> Result<()>;
}

/// Starts a browser and hands back a driver connected to it
#[async_trait]
pub trait Launcher: Send + Sync {
    type Driver: Driver;

    async fn launch(&self, config: &SessionConfig) -> Result<Self::Driver>;
}
