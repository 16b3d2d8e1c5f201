//! Contact: a lead or customer captured by a workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CareOpsError, ValidationError};
use crate::id::{ContactId, WorkspaceId};
use crate::time::{Timestamp, now};

/// Pipeline stage of a contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Booked,
    Closed,
}

impl ContactStatus {
    /// Wire/storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Contacted => "CONTACTED",
            Self::Qualified => "QUALIFIED",
            Self::Booked => "BOOKED",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(Self::New),
            "CONTACTED" => Ok(Self::Contacted),
            "QUALIFIED" => Ok(Self::Qualified),
            "BOOKED" => Ok(Self::Booked),
            "CLOSED" => Ok(Self::Closed),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

/// A person the business is in touch with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub workspace_id: WorkspaceId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: ContactStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Contact {
    /// Create a builder for constructing a [`Contact`].
    #[must_use]
    pub fn builder() -> ContactBuilder {
        ContactBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::Validation`] when:
    /// - `first_name` is empty ([`ValidationError::EmptyField`])
    /// - `email` is present but malformed ([`ValidationError::InvalidEmail`])
    pub fn validate(&self) -> Result<(), CareOpsError> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("first_name").into());
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }

    /// Full display name, e.g. `"Ana Lima"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

/// Minimal sanity check: one `@`, something on both sides, no whitespace.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`] when the address is implausible.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

/// Step-by-step builder for [`Contact`].
#[derive(Debug, Default)]
pub struct ContactBuilder {
    id: Option<ContactId>,
    workspace_id: Option<WorkspaceId>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    status: Option<ContactStatus>,
}

impl ContactBuilder {
    #[must_use]
    pub fn id(mut self, id: ContactId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn workspace_id(mut self, workspace_id: WorkspaceId) -> Self {
        self.workspace_id = Some(workspace_id);
        self
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: ContactStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Consume the builder, validate, and return a [`Contact`].
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::Validation`] if required fields are missing or invalid.
    pub fn build(self) -> Result<Contact, CareOpsError> {
        let ts = now();
        let contact = Contact {
            id: self.id.unwrap_or_default(),
            workspace_id: self.workspace_id.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email,
            phone: self.phone,
            status: self.status.unwrap_or_default(),
            created_at: ts,
            updated_at: ts,
        };
        contact.validate()?;
        Ok(contact)
    }
}
