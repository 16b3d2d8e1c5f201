//! Email delivery error type.

use careops_domain::error::CareOpsError;

/// Errors originating from the email provider.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// The request could not be built or sent.
    #[error("email transport error")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("email provider rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl From<EmailError> for CareOpsError {
    fn from(err: EmailError) -> Self {
        Self::Delivery(Box::new(err))
    }
}
