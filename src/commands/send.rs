use anyhow::{Context, Result};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use chatsend::{BrowserLauncher, ChatError, Launcher, Scenario};

use crate::commands::utils::BrowserArgs;

/// Message text from the argument or a file; a file's line endings become `\n`
/// and its final newline is dropped
pub fn read_message(message: Option<String>, message_file: Option<PathBuf>) -> Result<String> {
    match (message, message_file) {
        (Some(text), None) => Ok(text),
        (None, Some(path)) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read message file {}", path.display()))?;
            let text = text.replace("\r\n", "\n");
            let text = text.strip_suffix('\n').unwrap_or(&text);
            Ok(text.strip_suffix('\r').unwrap_or(text).to_string())
        }
        (Some(_), Some(_)) => anyhow::bail!("Pass either MESSAGE or --message-file, not both"),
        (None, None) => anyhow::bail!("No message given; pass MESSAGE or --message-file"),
    }
}

pub async fn handle_send(
    contact: String,
    message: Option<String>,
    message_file: Option<PathBuf>,
    browser: BrowserArgs,
    verify_timeout: u64,
    no_verify: bool,
) -> Result<()> {
    let text = read_message(message, message_file)?;
    let mut config = browser.session_config()?;
    config.timeouts.verification = Duration::from_secs(verify_timeout);

    info!("Sending message to '{}'", contact);
    let mut scenario = Scenario::new(BrowserLauncher, config);

    let result = run_steps(&mut scenario, &contact, &text, no_verify).await;
    scenario.finish().await;
    let delivery = result?;

    let output = json!({
        "contact": contact,
        "sent": true,
        "delivery": delivery,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Open, pick the chat, send and (optionally) confirm
async fn run_steps<L: Launcher>(
    scenario: &mut Scenario<L>,
    contact: &str,
    text: &str,
    no_verify: bool,
) -> Result<serde_json::Value, ChatError> {
    scenario.ensure_session_open().await?;
    scenario.resolve_contact(contact).await?;
    scenario.send_message(text).await?;

    if no_verify {
        return Ok(json!("skipped"));
    }

    let status = scenario.assert_last_send_verified().await?;
    eprintln!("{}", status.describe());
    Ok(json!(status))
}
