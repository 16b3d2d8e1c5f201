//! Email port: outbound transactional email.

use std::future::Future;

use careops_domain::error::CareOpsError;

/// A fully rendered email, ready to hand to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    /// Overrides the provider's default sender when set.
    pub from: Option<String>,
}

/// Sends rendered emails.
pub trait EmailSender {
    /// Deliver one message. Failures surface as [`CareOpsError::Delivery`].
    fn send(&self, message: EmailMessage) -> impl Future<Output = Result<(), CareOpsError>> + Send;
}

impl<T: EmailSender + Send + Sync> EmailSender for std::sync::Arc<T> {
    fn send(&self, message: EmailMessage) -> impl Future<Output = Result<(), CareOpsError>> + Send {
        (**self).send(message)
    }
}
