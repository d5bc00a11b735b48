use anyhow::{Context, Result};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::driver::{Driver, Launcher};
use crate::types::Selector;
use crate::webdriver_manager::WebDriverManager;

/// Browser instance for WebDriver automation
pub struct Browser {
    client: Client,
    /// Driver processes started for this browser; empty when connecting to an external one
    manager: WebDriverManager,
}

/// Supported browser types
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BrowserType {
    /// Mozilla Firefox
    Firefox,
    /// Google Chrome/Chromium
    Chrome,
}

impl std::str::FromStr for BrowserType {
    type Err = anyhow::Error;

    /// Parse browser type from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "firefox" => Ok(BrowserType::Firefox),
            "chrome" | "chromium" => Ok(BrowserType::Chrome),
            _ => anyhow::bail!("Unsupported browser: {}", s),
        }
    }
}

impl BrowserType {
    pub fn driver_command(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "geckodriver",
            BrowserType::Chrome => "chromedriver",
        }
    }
}

/// Build the WebDriver capabilities for a chat session
///
/// The user data directory carries the chat login between runs; the
/// automation switches are turned off so the app does not see a banner-marked
/// browser.
pub fn capabilities(config: &SessionConfig) -> serde_json::Map<String, serde_json::Value> {
    let mut caps = serde_json::Map::new();

    match config.browser {
        BrowserType::Chrome => {
            let mut args = Vec::new();

            if let Some(dir) = &config.user_data_dir {
                args.push(format!("--user-data-dir={}", dir.display()));
            }
            if let Some(profile) = &config.profile_directory {
                args.push(format!("--profile-directory={}", profile));
            }
            if config.maximized {
                args.push("--start-maximized".to_string());
            }
            if config.headless {
                args.push("--headless=new".to_string());
                args.push("--disable-gpu".to_string());
            }

            caps.insert(
                "goog:chromeOptions".to_string(),
                json!({
                    "args": args,
                    "excludeSwitches": ["enable-automation"],
                    "useAutomationExtension": false,
                }),
            );
        }
        BrowserType::Firefox => {
            let mut args = Vec::new();

            if config.headless {
                args.push("--headless".to_string());
            }
            if let Some(dir) = &config.user_data_dir {
                args.push("-profile".to_string());
                args.push(dir.display().to_string());
            }

            caps.insert("moz:firefoxOptions".to_string(), json!({ "args": args }));
        }
    }

    caps
}

impl Browser {
    /// Start (or reuse) a WebDriver and open a browser session
    pub async fn new(config: &SessionConfig) -> Result<Self> {
        info!("Connecting to {:?} WebDriver", config.browser);

        let manager = WebDriverManager::new();
        let webdriver_url = match &config.webdriver_url {
            Some(url) => url.clone(),
            None => manager.ensure_driver(&config.browser).await?,
        };

        if let Some(dir) = &config.user_data_dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create profile directory {}", dir.display()))?;
        }

        debug!("Connecting to WebDriver at {}", webdriver_url);
        let client = ClientBuilder::rustls()
            .capabilities(capabilities(config))
            .connect(&webdriver_url)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to WebDriver at {}. Is another browser already using this profile?",
                    webdriver_url
                )
            })?;

        Ok(Browser { client, manager })
    }
}

fn locator(selector: &Selector) -> Locator<'_> {
    match selector {
        Selector::Css(pattern) => Locator::Css(pattern),
        Selector::XPath(pattern) => Locator::XPath(pattern),
    }
}

#[async_trait]
impl Driver for Browser {
    type Element = Element;

    async fn goto(&self, url: &str) -> Result<()> {
        info!("Navigating to {}", url);
        self.client.goto(url).await?;
        Ok(())
    }

    async fn find_all(&self, selector: &Selector) -> Result<Vec<Element>> {
        let elements = self
            .client
            .find_all(locator(selector))
            .await
            .with_context(|| format!("Lookup failed for {}", selector))?;
        Ok(elements)
    }

    async fn is_displayed(&self, element: &Element) -> Result<bool> {
        Ok(element.is_displayed().await?)
    }

    async fn is_enabled(&self, element: &Element) -> Result<bool> {
        Ok(element.is_enabled().await?)
    }

    async fn click(&self, element: &Element) -> Result<()> {
        element.click().await.context("Click failed")?;
        Ok(())
    }

    async fn clear(&self, element: &Element) -> Result<()> {
        element.clear().await.context("Clearing element failed")?;
        Ok(())
    }

    async fn send_keys(&self, element: &Element, keys: &str) -> Result<()> {
        element.send_keys(keys).await.context("Typing failed")?;
        Ok(())
    }

    async fn quit(&self) -> Result<()> {
        let result = self.client.clone().close().await;
        self.manager.stop_all();
        result.context("Failed to close browser session")?;
        Ok(())
    }
}

/// Launches real browsers through fantoccini
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserLauncher;

#[async_trait]
impl Launcher for BrowserLauncher {
    type Driver = Browser;

    async fn launch(&self, config: &SessionConfig) -> Result<Browser> {
        Browser::new(config).await
    }
}

#[cfg(test)]
#[path = "webdriver_test.rs"]
mod webdriver_test;
