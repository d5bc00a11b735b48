//! Type multi-line messages into the compose box and submit them

use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use crate::driver::Driver;
use crate::errors::ChatError;
use crate::locator::locate;
use crate::selectors;
use crate::session::Session;
use crate::types::{Keystroke, MessagePayload, SentRecord};

/// Key events that produce `text` in a compose box and then submit it
///
/// Every line is followed by a soft newline; the last one is taken back with
/// a backspace so Enter submits the message exactly once, at the end.
pub fn keystrokes(text: &str) -> Vec<Keystroke> {
    let payload = MessagePayload::new(text);
    let mut keys = Vec::with_capacity(payload.lines().len() * 2 + 2);

    for line in payload.lines() {
        if !line.is_empty() {
            keys.push(Keystroke::Text(line.clone()));
        }
        keys.push(Keystroke::SoftNewline);
    }

    keys.push(Keystroke::Backspace);
    keys.push(Keystroke::Submit);
    keys
}

/// Text a compose box shows after receiving `keys`, up to the submit
pub fn replay(keys: &[Keystroke]) -> String {
    let mut buffer = String::new();

    for key in keys {
        match key {
            Keystroke::Text(text) => buffer.push_str(text),
            Keystroke::SoftNewline => buffer.push('\n'),
            Keystroke::Backspace => {
                buffer.pop();
            }
            Keystroke::Submit => break,
        }
    }

    buffer
}

/// Type `text` into the open chat and submit it
///
/// Whitespace-only text is refused: the chat application will not submit it.
pub async fn send<D: Driver>(session: &Session<D>, text: &str) -> Result<SentRecord, ChatError> {
    if text.trim().is_empty() {
        return Err(ChatError::EmptyMessage);
    }

    let driver = session.driver();
    let t = session.timeouts();

    let message_box = locate(
        driver,
        &selectors::message_box(t.per_candidate),
        t.default,
        t.poll_interval,
    )
    .await?;
    driver.click(&message_box).await?;

    let keys = keystrokes(text);
    debug!("Sending {} key events", keys.len());
    for key in &keys {
        driver.send_keys(&message_box, &key.as_keys()).await?;
    }

    let record = SentRecord {
        text: MessagePayload::new(text).text(),
        sent_at: Instant::now(),
    };
    info!("Message submitted ({} chars)", text.chars().count());
    sleep(t.after_send).await;

    Ok(record)
}

#[cfg(test)]
#[path = "composer_test.rs"]
mod composer_test;
