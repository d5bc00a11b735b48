//! # chatsend
#![allow(clippy::uninlined_format_args)]
//!
//! Send messages through WhatsApp Web by driving a real browser over WebDriver.
//!
//! The chat application's markup changes often, so every element is found
//! through a layered strategy: a few exact selectors, each with a short
//! bounded wait, then a structural scan over generic editable regions.
//! Delivery is confirmed on a best-effort basis by looking for the outgoing
//! message bubble.
//!
//! ## CLI Usage
//!
//! ```bash
//! # First run: open a visible browser and scan the QR code
//! chatsend login --profile personal
//!
//! # Send a message (multi-line text keeps its line breaks)
//! chatsend send "Work Group" "Deploy finished
//! All green" --profile personal
//!
//! # Headless, with an externally managed chromedriver
//! chatsend send "Alice" "hi" --profile personal --headless \
//!     --webdriver-url http://localhost:9515
//!
//! # Manage persistent profiles
//! chatsend profile list
//! chatsend profile delete personal
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use chatsend::{BrowserLauncher, DeliveryStatus, Scenario, SessionConfig};
//!
//! # async fn example() -> Result<(), chatsend::ChatError> {
//! let mut scenario = Scenario::new(BrowserLauncher, SessionConfig::default());
//! scenario.ensure_session_open().await?;
//! scenario.resolve_contact("Work Group").await?;
//! scenario.send_message("Deploy finished\nAll green").await?;
//!
//! if scenario.assert_last_send_verified().await? == DeliveryStatus::Unconfirmed {
//!     eprintln!("could not confirm delivery, check the chat manually");
//! }
//! # Ok(())
//! # }
//! ```

/// Message composition into key events
pub mod composer;

/// Session configuration and wait budgets
pub mod config;

/// Opening a conversation by name
pub mod contact;

/// Browser capability traits
pub mod driver;

/// Error taxonomy and exit codes
pub mod errors;

/// Layered element lookup
pub mod locator;

/// Profile management for browser sessions
pub mod profile;

/// Step-level API for scenario runners
pub mod scenario;

/// Selector tables per UI role
pub mod selectors;

/// Browser session lifecycle
pub mod session;

/// Type definitions shared across modules
pub mod types;

/// Delivery confirmation
pub mod verifier;

/// Bounded polling
pub mod wait;

/// WebDriver browser control and automation
pub mod webdriver;

/// Automatic WebDriver process management
pub mod webdriver_manager;

#[cfg(test)]
mod testing;

pub use config::{SessionConfig, Timeouts};
pub use driver::{Driver, Launcher};
pub use errors::ChatError;
pub use profile::ProfileManager;
pub use scenario::Scenario;
pub use session::Session;
pub use types::{DeliveryStatus, Keystroke, LocatorSpec, MessagePayload, Role, Selector, SentRecord};
pub use webdriver::{Browser, BrowserLauncher, BrowserType};
