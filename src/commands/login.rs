use anyhow::Result;
use serde_json::json;
use std::time::Duration;
use tracing::info;

use chatsend::{BrowserLauncher, Session};

use crate::commands::utils::BrowserArgs;

/// Open a visible browser and wait for the user to scan the QR code
///
/// The login survives in the profile directory, so later `send` runs can go
/// headless.
pub async fn handle_login(mut browser: BrowserArgs, timeout: u64) -> Result<()> {
    if browser.profile.is_none() && browser.user_data_dir.is_none() {
        anyhow::bail!("login needs --profile or --user-data-dir to keep the session");
    }
    browser.headless = false;

    let mut config = browser.session_config()?;
    config.timeouts.app_shell = Duration::from_secs(timeout);

    info!("Waiting up to {}s for the chat list; scan the QR code if asked", timeout);
    let session = Session::open(&BrowserLauncher, &config).await?;
    session.close().await;

    let output = json!({
        "ready": true,
        "profile": browser.profile,
        "user_data_dir": config.user_data_dir,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
