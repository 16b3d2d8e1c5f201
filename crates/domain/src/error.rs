//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`CareOpsError`] via `From`, so callers only ever match on one enum.

/// Top-level error returned by domain validation, services and ports.
#[derive(Debug, thiserror::Error)]
pub enum CareOpsError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist (or belongs to another workspace).
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An outbound delivery (email, …) failed.
    #[error("delivery error")]
    Delivery(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("quantity must not be negative")]
    NegativeQuantity,

    #[error("duration must be positive")]
    InvalidDuration,

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("cannot transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

/// A lookup that found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record, e.g. `"Contact"`.
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}
