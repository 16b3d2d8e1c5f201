//! Log-only sender used when no provider is configured.

use careops_app::ports::{EmailMessage, EmailSender};
use careops_domain::error::CareOpsError;

/// Writes every message to the log instead of delivering it.
#[derive(Debug, Default, Clone)]
pub struct LogEmailSender;

impl EmailSender for LogEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), CareOpsError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "email delivery disabled, message not sent"
        );
        Ok(())
    }
}
