//! Outbound email contract.
//!
//! The platform's mail pipeline lives elsewhere; the authentication flows
//! only need a recipient and a verification code, fire-and-forget.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

/// Sender of account verification emails.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_verification(&self, recipient: &str, code: &str) -> Result<(), DomainError>;
}

/// Sender that records every message instead of delivering it.
#[derive(Clone, Default)]
pub struct RecordingEmailSender {
    sent: Arc<RwLock<Vec<(String, String)>>>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far as (recipient, code) pairs.
    pub async fn sent(&self) -> Vec<(String, String)> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_verification(&self, recipient: &str, code: &str) -> Result<(), DomainError> {
        let mut sent = self.sent.write().await;
        sent.push((recipient.to_string(), code.to_string()));
        Ok(())
    }
}
