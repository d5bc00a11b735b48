//! Browser session lifecycle: launch, wait for the app shell, close

use anyhow::Context;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::{SessionConfig, Timeouts};
use crate::driver::{Driver, Launcher};
use crate::errors::ChatError;
use crate::locator::{locate, wait_for_presence};
use crate::selectors;

/// One open chat application in one browser
///
/// Owned by the caller for its whole life; nothing else holds the driver.
pub struct Session<D: Driver> {
    driver: D,
    url: String,
    ready: bool,
    timeouts: Timeouts,
}

impl<D: Driver> Session<D> {
    /// Launch a browser through `launcher` and open the chat application
    pub async fn open<L>(launcher: &L, config: &SessionConfig) -> Result<Self, ChatError>
    where
        L: Launcher<Driver = D>,
    {
        config.validate().map_err(ChatError::Config)?;

        info!("Launching {:?} for {}", config.browser, config.target_url);
        let driver = launcher
            .launch(config)
            .await
            .context("Failed to launch browser")?;

        Self::start(driver, config).await
    }

    /// Navigate an already running driver and wait until the app is usable
    ///
    /// On failure the browser is shut down before the error is returned.
    pub async fn start(driver: D, config: &SessionConfig) -> Result<Self, ChatError> {
        let mut session = Session {
            driver,
            url: config.target_url.clone(),
            ready: false,
            timeouts: config.timeouts.clone(),
        };

        if let Err(e) = session.driver.goto(&session.url).await {
            session.close().await;
            return Err(ChatError::Driver(
                e.context(format!("Failed to navigate to {}", config.target_url)),
            ));
        }

        if let Err(source) = session.wait_until_ready().await {
            let url = session.url.clone();
            session.close().await;
            return Err(ChatError::SessionNotReady {
                url,
                source: Box::new(source),
            });
        }

        sleep(session.timeouts.after_open).await;
        Ok(session)
    }

    /// Chat list first; the search box is the second readiness signal
    async fn wait_until_ready(&mut self) -> Result<(), ChatError> {
        let t = &self.timeouts;
        let marker = selectors::app_shell();

        if wait_for_presence(&self.driver, &marker, t.app_shell, t.poll_interval)
            .await
            .is_some()
        {
            info!("Chat application loaded");
            self.ready = true;
            return Ok(());
        }

        warn!(
            "No chat list after {:?}, looking for the search box instead",
            t.app_shell
        );
        let spec = selectors::search_box(t.per_candidate);
        locate(&self.driver, &spec, t.default, t.poll_interval).await?;

        info!("Chat application loaded (search box visible)");
        self.ready = true;
        Ok(())
    }

    /// Release the browser. Errors are logged and dropped.
    pub async fn close(self) {
        debug!("Closing browser session for {}", self.url);
        if let Err(e) = self.driver.quit().await {
            debug!("Ignoring error while closing browser: {:#}", e);
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
