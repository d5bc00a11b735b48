use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Semantic purpose of an element lookup, independent of any selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Chat list container that signals the application has loaded
    AppShell,
    /// Search / start-new-chat input
    SearchBox,
    /// Search result whose label equals the requested contact
    ContactLabel,
    /// Any entry of the search result list
    ResultItem,
    /// Compose box of the open conversation
    MessageBox,
    /// Rendered outgoing message bubble
    SentConfirmation,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::AppShell => "app shell",
            Role::SearchBox => "search box",
            Role::ContactLabel => "contact label",
            Role::ResultItem => "search result",
            Role::MessageBox => "message box",
            Role::SentConfirmation => "sent-message confirmation",
        };
        f.write_str(name)
    }
}

/// A single structural pattern understood by the driver
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    Css(String),
    XPath(String),
}

impl Selector {
    pub fn css(pattern: impl Into<String>) -> Self {
        Selector::Css(pattern.into())
    }

    pub fn xpath(pattern: impl Into<String>) -> Self {
        Selector::XPath(pattern.into())
    }

    pub fn pattern(&self) -> &str {
        match self {
            Selector::Css(p) | Selector::XPath(p) => p,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(p) => write!(f, "css:{}", p),
            Selector::XPath(p) => write!(f, "xpath:{}", p),
        }
    }
}

/// Which visible element of a structural scan to take
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pick {
    /// First in document order (search-type roles)
    First,
    /// Last in document order (compose-type roles)
    Last,
}

/// Last-resort scan over every element matching a broad pattern
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fallback {
    pub pattern: Selector,
    pub pick: Pick,
}

/// Ordered lookup strategy for one role
#[derive(Clone, Debug)]
pub struct LocatorSpec {
    pub role: Role,
    /// Exact selectors, tried in declared order
    pub candidates: Vec<Selector>,
    pub fallback: Option<Fallback>,
    /// Wait budget for each candidate (capped by the overall timeout)
    pub per_attempt: Duration,
}

impl LocatorSpec {
    pub fn new(role: Role, candidates: Vec<Selector>, per_attempt: Duration) -> Self {
        Self {
            role,
            candidates,
            fallback: None,
            per_attempt,
        }
    }

    pub fn with_fallback(mut self, pattern: Selector, pick: Pick) -> Self {
        self.fallback = Some(Fallback { pattern, pick });
        self
    }
}

/// Key event sent to the compose box
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Keystroke {
    /// Literal characters of one line
    Text(String),
    /// Shift+Enter: line break without submitting
    SoftNewline,
    Backspace,
    /// Enter: transmit the message
    Submit,
}

// W3C WebDriver key code points
const SHIFT: char = '\u{E008}';
const ENTER: char = '\u{E007}';
const BACKSPACE: char = '\u{E003}';

impl Keystroke {
    /// Render as the string passed to the WebDriver "element send keys" command
    pub fn as_keys(&self) -> String {
        match self {
            Keystroke::Text(text) => text.clone(),
            Keystroke::SoftNewline => [SHIFT, ENTER].iter().collect(),
            Keystroke::Backspace => BACKSPACE.to_string(),
            Keystroke::Submit => ENTER.to_string(),
        }
    }
}

/// Message text split into the lines typed between soft newlines
///
/// `\r\n` counts as one line break; carriage returns never reach the compose box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessagePayload {
    lines: Vec<String>,
}

impl MessagePayload {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
                .collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Original text: lines joined by line breaks
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// The last transmitted message, kept for one verification cycle
#[derive(Clone, Debug)]
pub struct SentRecord {
    pub text: String,
    pub sent_at: Instant,
}

/// Outcome of delivery verification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// An outgoing bubble with the text was found
    Confirmed,
    /// No bubble within the timeout; the message may still have gone out
    Unconfirmed,
}

impl DeliveryStatus {
    pub fn describe(&self) -> &'static str {
        match self {
            DeliveryStatus::Confirmed => "message delivery confirmed",
            DeliveryStatus::Unconfirmed => {
                "could not confirm that the message was sent, check the chat manually"
            }
        }
    }
}

/// Quote `value` as an XPath 1.0 string literal
///
/// XPath has no escape sequences, so a value holding both quote kinds is
/// assembled with `concat()`.
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }
    if !value.contains('\'') {
        return format!("'{}'", value);
    }

    let parts: Vec<String> = value
        .split('"')
        .map(|part| format!("\"{}\"", part))
        .collect();
    format!("concat({})", parts.join(", '\"', "))
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
