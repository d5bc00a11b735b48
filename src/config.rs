//! Session configuration and wait budgets

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::webdriver::BrowserType;

/// Default chat application entry point
pub const DEFAULT_TARGET_URL: &str = "https://web.whatsapp.com/";

/// Bounded waits used across the automation steps
#[derive(Clone, Debug)]
pub struct Timeouts {
    /// Overall budget for locating the search and message boxes
    pub default: Duration,
    /// Wait for the chat list after navigation (QR login can be slow)
    pub app_shell: Duration,
    /// Wait for each exact selector before moving to the next one
    pub per_candidate: Duration,
    pub contact_label: Duration,
    pub first_result: Duration,
    pub verification: Duration,
    pub poll_interval: Duration,
    pub after_clear: Duration,
    pub after_open: Duration,
    pub after_contact: Duration,
    pub after_send: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            default: Duration::from_secs(20),
            app_shell: Duration::from_secs(60),
            per_candidate: Duration::from_secs(5),
            contact_label: Duration::from_secs(10),
            first_result: Duration::from_secs(5),
            verification: Duration::from_secs(20),
            poll_interval: Duration::from_millis(250),
            after_clear: Duration::from_millis(300),
            after_open: Duration::from_secs(1),
            after_contact: Duration::from_millis(700),
            after_send: Duration::from_secs(1),
        }
    }
}

/// Everything needed to launch a browser and open the chat application
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub browser: BrowserType,
    /// Browser user data directory; keeps the chat login between runs
    pub user_data_dir: Option<PathBuf>,
    /// Chrome profile inside the user data directory (e.g. "Default")
    pub profile_directory: Option<String>,
    pub headless: bool,
    pub maximized: bool,
    /// Connect to this WebDriver instead of managing one
    pub webdriver_url: Option<String>,
    pub target_url: String,
    pub timeouts: Timeouts,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            browser: BrowserType::Chrome,
            user_data_dir: None,
            profile_directory: None,
            headless: false,
            maximized: true,
            webdriver_url: None,
            target_url: DEFAULT_TARGET_URL.to_string(),
            timeouts: Timeouts::default(),
        }
    }
}

impl SessionConfig {
    /// Reject target URLs the browser could not navigate to
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.target_url)
            .with_context(|| format!("Invalid target URL: {}", self.target_url))?;
        if !matches!(parsed.scheme(), "http" | "https" | "file") {
            anyhow::bail!("Unsupported URL scheme: {}", parsed.scheme());
        }

        if let Some(driver_url) = &self.webdriver_url {
            url::Url::parse(driver_url)
                .with_context(|| format!("Invalid WebDriver URL: {}", driver_url))?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
