//! # careops-adapter-email-http
//!
//! Implements [`EmailSender`](careops_app::ports::EmailSender) on top of a
//! transactional email provider reached over HTTP.
//!
//! ## Responsibilities
//! - POST each message as JSON with bearer authentication
//! - Turn transport failures and non-2xx answers into delivery errors
//! - Offer a log-only sender for deployments without provider credentials
//!
//! ## Dependency rule
//! Depends on `careops-app` (for the port trait) and `careops-domain`.

mod error;
mod http;
mod log;

pub use error::EmailError;
pub use http::{HttpEmailSender, Settings};
pub use log::LogEmailSender;

use careops_app::ports::{EmailMessage, EmailSender};
use careops_domain::error::CareOpsError;

/// The sender selected at startup.
pub enum Mailer {
    Http(HttpEmailSender),
    Log(LogEmailSender),
}

impl EmailSender for Mailer {
    async fn send(&self, message: EmailMessage) -> Result<(), CareOpsError> {
        match self {
            Self::Http(sender) => sender.send(message).await,
            Self::Log(sender) => sender.send(message).await,
        }
    }
}
