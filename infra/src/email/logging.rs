//! Email sender that logs instead of delivering.
//!
//! Stand-in for environments without a mail pipeline. The code itself stays
//! out of the logs.

use async_trait::async_trait;

use md_core::errors::DomainError;
use md_core::services::email::EmailSender;

#[derive(Clone, Copy, Default)]
pub struct LoggingEmailSender;

impl LoggingEmailSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailSender for LoggingEmailSender {
    async fn send_verification(&self, recipient: &str, _code: &str) -> Result<(), DomainError> {
        tracing::info!(%recipient, "verification email dispatched");
        Ok(())
    }
}
