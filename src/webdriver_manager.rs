use anyhow::{Context, Result};
use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};

use crate::webdriver::BrowserType;
use crate::wait::poll_until;

/// Owns the WebDriver processes (geckodriver, chromedriver) started for one browser
#[derive(Default)]
pub struct WebDriverManager {
    processes: Mutex<Vec<WebDriverProcess>>,
}

struct WebDriverProcess {
    child: Child,
    port: u16,
}

impl WebDriverManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn processes(&self) -> MutexGuard<'_, Vec<WebDriverProcess>> {
        self.processes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Ensure a WebDriver is running for the given browser type
    /// Returns the URL to connect to
    pub async fn ensure_driver(&self, browser_type: &BrowserType) -> Result<String> {
        let standard_url = format!("http://localhost:{}", Self::standard_port(browser_type));
        if Self::verify_driver_working(&standard_url).await {
            debug!("Found external WebDriver at {}", standard_url);
            return Ok(standard_url);
        }

        info!("WebDriver not detected, attempting to start automatically...");
        self.start_driver(browser_type).await
    }

    fn standard_port(browser_type: &BrowserType) -> u16 {
        match browser_type {
            BrowserType::Firefox => 4444,
            BrowserType::Chrome => 9515,
        }
    }

    /// Start a WebDriver process
    async fn start_driver(&self, browser_type: &BrowserType) -> Result<String> {
        let command = browser_type.driver_command();
        let port = Self::find_free_port_for_browser(browser_type)?;
        let args = match browser_type {
            BrowserType::Firefox => vec!["--port".to_string(), port.to_string()],
            BrowserType::Chrome => vec![format!("--port={}", port)],
        };
        info!("Starting {} on port {}", command, port);

        if !Self::command_exists(command) {
            anyhow::bail!(
                "{} not found in PATH. Please install it:\n\
                  macOS: brew install {}\n\
                  Linux: Download from official releases\n\
                  Or see: https://www.selenium.dev/documentation/webdriver/getting_started/install_drivers/",
                command,
                command
            );
        }

        let child = Command::new(command)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context(format!("Failed to start {}", command))?;

        self.processes().push(WebDriverProcess { child, port });

        let url = format!("http://localhost:{}", port);
        let ready = poll_until(Duration::from_millis(100), Duration::from_secs(3), || {
            let url = url.clone();
            async move { Self::is_driver_running(&url).await.then_some(()) }
        })
        .await;

        if ready.is_some() {
            info!("WebDriver started successfully on port {}", port);
            return Ok(url);
        }

        self.cleanup_failed_process(port);
        anyhow::bail!("{} failed to start within timeout", command)
    }

    /// Check if a command exists in PATH
    pub fn command_exists(command: &str) -> bool {
        #[cfg(not(windows))]
        let finder = "which";
        #[cfg(windows)]
        let finder = "where";

        Command::new(finder)
            .arg(command)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Find a free port to use
    pub fn find_free_port_for_browser(browser_type: &BrowserType) -> Result<u16> {
        let first = Self::standard_port(browser_type);

        for port in first..first + 3 {
            if !Self::is_port_in_use(port) {
                debug!("Found free port {} for {:?}", port, browser_type);
                return Ok(port);
            }
            debug!("Port {} is in use for {:?}", port, browser_type);
        }

        // Fall back to letting OS assign a port
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        drop(listener);
        Ok(port)
    }

    /// Check if a port is in use
    pub fn is_port_in_use(port: u16) -> bool {
        std::net::TcpListener::bind(("127.0.0.1", port)).is_err()
    }

    /// Check if WebDriver is running at the given URL
    pub async fn is_driver_running(url: &str) -> bool {
        let status_url = format!("{}/status", url);

        match reqwest::Client::new()
            .get(&status_url)
            .timeout(Duration::from_secs(1))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// A working driver reports `ready: true`; a busy one refuses new sessions
    async fn verify_driver_working(url: &str) -> bool {
        let status_url = format!("{}/status", url);

        match reqwest::Client::new()
            .get(&status_url)
            .timeout(Duration::from_secs(1))
            .send()
            .await
        {
            Ok(response) => match response.json::<serde_json::Value>().await {
                Ok(body) => body
                    .get("value")
                    .and_then(|v| v.get("ready"))
                    .and_then(|r| r.as_bool())
                    .unwrap_or(false),
                Err(_) => false,
            },
            Err(_) => false,
        }
    }

    fn cleanup_failed_process(&self, port: u16) {
        let mut processes = self.processes();
        if let Some(index) = processes.iter().position(|p| p.port == port) {
            let mut process = processes.remove(index);
            let _ = process.child.kill();
            let _ = process.child.wait();
        }
    }

    /// Stop all managed WebDriver processes
    pub fn stop_all(&self) {
        let mut processes = self.processes();
        for process in processes.iter_mut() {
            debug!("Stopping WebDriver on port {}", process.port);
            let _ = process.child.kill();
            let _ = process.child.wait();
        }
        processes.clear();
    }

    /// Number of driver processes this manager started and still owns
    pub fn managed_count(&self) -> usize {
        self.processes().len()
    }
}

impl Drop for WebDriverManager {
    fn drop(&mut self) {
        self.stop_all();
    }
}

#[cfg(test)]
#[path = "webdriver_manager_test.rs"]
mod webdriver_manager_test;
