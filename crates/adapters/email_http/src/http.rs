//! HTTP provider sender.

use std::time::Duration;

use reqwest::{Client, header};
use serde::Serialize;

use careops_app::ports::{EmailMessage, EmailSender};
use careops_domain::error::CareOpsError;

use crate::error::EmailError;

/// Provider endpoint and credentials.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Full URL messages are POSTed to.
    pub api_url: String,
    pub api_key: String,
    /// Sender used when a message does not set its own `from`.
    pub default_from: String,
    pub timeout: Duration,
}

/// Request body understood by the provider.
#[derive(Debug, Serialize)]
struct Outgoing<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

impl<'a> Outgoing<'a> {
    fn new(message: &'a EmailMessage, default_from: &'a str) -> Self {
        Self {
            from: message.from.as_deref().unwrap_or(default_from),
            to: [message.to.as_str()],
            subject: &message.subject,
            html: &message.html,
        }
    }
}

/// Delivers messages through the provider's JSON API.
#[derive(Clone)]
pub struct HttpEmailSender {
    client: Client,
    settings: Settings,
}

impl HttpEmailSender {
    /// Build a sender with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError::Transport`] if the HTTP client cannot be built.
    pub fn new(settings: Settings) -> Result<Self, EmailError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    async fn deliver(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let body = Outgoing::new(message, &self.settings.default_from);
        let response = self
            .client
            .post(&self.settings.api_url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.settings.api_key),
            )
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(EmailError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

impl EmailSender for HttpEmailSender {
    #[tracing::instrument(skip(self, message), fields(to = %message.to))]
    async fn send(&self, message: EmailMessage) -> Result<(), CareOpsError> {
        self.deliver(&message).await?;
        tracing::debug!(subject = %message.subject, "email accepted by provider");
        Ok(())
    }
}
