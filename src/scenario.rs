//! Step-level surface for scenario runners and the CLI
//!
//! Each method maps onto one step of the "send a message" flow:
//! open the app, pick the chat, send, confirm.

use tracing::info;

use crate::composer;
use crate::config::SessionConfig;
use crate::contact;
use crate::driver::Launcher;
use crate::errors::ChatError;
use crate::session::Session;
use crate::types::{DeliveryStatus, SentRecord};
use crate::verifier;

pub struct Scenario<L: Launcher> {
    launcher: L,
    config: SessionConfig,
    session: Option<Session<L::Driver>>,
    last_sent: Option<SentRecord>,
}

impl<L: Launcher> Scenario<L> {
    pub fn new(launcher: L, config: SessionConfig) -> Self {
        Self {
            launcher,
            config,
            session: None,
            last_sent: None,
        }
    }

    /// Open the chat application unless a session is already up
    pub async fn ensure_session_open(&mut self) -> Result<(), ChatError> {
        if self.session.is_none() {
            let session = Session::open(&self.launcher, &self.config).await?;
            self.session = Some(session);
        }
        Ok(())
    }

    pub async fn resolve_contact(&mut self, name: &str) -> Result<(), ChatError> {
        let session = self.session.as_ref().ok_or(ChatError::SessionClosed)?;
        contact::resolve(session, name).await
    }

    pub async fn send_message(&mut self, text: &str) -> Result<(), ChatError> {
        let session = self.session.as_ref().ok_or(ChatError::SessionClosed)?;
        let record = composer::send(session, text).await?;
        self.last_sent = Some(record);
        Ok(())
    }

    /// Check the last send, then release the browser
    ///
    /// An unconfirmed delivery is an outcome, not an error.
    pub async fn assert_last_send_verified(&mut self) -> Result<DeliveryStatus, ChatError> {
        let record = self.last_sent.clone().ok_or(ChatError::NothingSent)?;
        let session = self.session.take().ok_or(ChatError::SessionClosed)?;
        self.last_sent = None;

        let timeout = self.config.timeouts.verification;
        let status = if verifier::verify(&session, &record, timeout).await {
            DeliveryStatus::Confirmed
        } else {
            DeliveryStatus::Unconfirmed
        };
        session.close().await;

        info!("{}", status.describe());
        Ok(status)
    }

    pub fn last_sent(&self) -> Option<&SentRecord> {
        self.last_sent.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Close any open session
    pub async fn finish(&mut self) {
        if let Some(session) = self.session.take() {
            session.close().await;
        }
    }
}

#[cfg(test)]
#[path = "scenario_test.rs"]
mod scenario_test;
