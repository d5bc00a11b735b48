use thiserror::Error;

use crate::types::Role;

/// Errors surfaced by the chat automation steps
///
/// Per-candidate lookup misses never show up here; only an exhausted
/// [`LocatorSpec`](crate::types::LocatorSpec) escalates to [`ChatError::NotFound`].
#[derive(Debug, Error)]
pub enum ChatError {
    /// Every candidate selector and the structural fallback came up empty (exit code 2)
    #[error("Could not locate the {role} after trying every selector and the fallback")]
    NotFound { role: Role },

    /// Neither the exact contact label nor the first search result could be clicked (exit code 3)
    #[error("Could not find contact or group '{name}': {source}")]
    ContactNotFound {
        name: String,
        #[source]
        source: Box<ChatError>,
    },

    /// The chat application never finished loading (exit code 4)
    #[error("Chat application at {url} did not become ready: {source}")]
    SessionNotReady {
        url: String,
        #[source]
        source: Box<ChatError>,
    },

    /// WebDriver connection or command failure (exit code 5)
    #[error("WebDriver failure: {0:#}")]
    Driver(#[from] anyhow::Error),

    /// Unusable session configuration
    #[error("Invalid configuration: {0:#}")]
    Config(#[source] anyhow::Error),

    /// Nothing to type
    #[error("Refusing to send an empty message")]
    EmptyMessage,

    /// Verification requested before any message was sent
    #[error("No message has been sent yet, nothing to verify")]
    NothingSent,

    /// A step that needs the browser ran without an open session
    #[error("No browser session is open")]
    SessionClosed,
}

impl ChatError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ChatError::NotFound { .. } => 2,
            ChatError::ContactNotFound { .. } => 3,
            ChatError::SessionNotReady { .. } => 4,
            ChatError::Driver(_) => 5,
            ChatError::Config(_)
            | ChatError::EmptyMessage
            | ChatError::NothingSent
            | ChatError::SessionClosed => 1,
        }
    }

    /// Whether the caller may retry (e.g. with another contact name)
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ChatError::SessionNotReady { .. } | ChatError::Driver(_) | ChatError::Config(_)
        )
    }
}

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;
