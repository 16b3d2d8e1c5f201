//! Form submissions: intake/consent forms a contact is expected to fill in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CareOpsError, ValidationError};
use crate::id::{ContactId, FormSubmissionId, WorkspaceId};
use crate::time::{Timestamp, now};

/// Entity type recorded on alerts raised for form submissions.
pub const ENTITY_TYPE: &str = "form_submission";

/// Where a submission stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormStatus {
    #[default]
    Pending,
    Completed,
    Overdue,
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Overdue => "OVERDUE",
        })
    }
}

impl FromStr for FormStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "COMPLETED" => Ok(Self::Completed),
            "OVERDUE" => Ok(Self::Overdue),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

/// A form sent to (or started by) a contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSubmission {
    pub id: FormSubmissionId,
    pub workspace_id: WorkspaceId,
    pub contact_id: Option<ContactId>,
    pub form_name: String,
    pub status: FormStatus,
    pub due_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FormSubmission {
    /// Create a new pending submission.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when `form_name` is blank.
    pub fn pending(
        workspace_id: WorkspaceId,
        contact_id: Option<ContactId>,
        form_name: impl Into<String>,
        due_at: Option<Timestamp>,
    ) -> Result<Self, CareOpsError> {
        let form_name = form_name.into();
        if form_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("form_name").into());
        }
        let ts = now();
        Ok(Self {
            id: FormSubmissionId::new(),
            workspace_id,
            contact_id,
            form_name,
            status: FormStatus::Pending,
            due_at,
            created_at: ts,
            updated_at: ts,
        })
    }

    /// Move to `OVERDUE`. Only pending submissions can become overdue.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTransition`] otherwise.
    pub fn mark_overdue(&mut self, at: Timestamp) -> Result<(), CareOpsError> {
        self.transition(FormStatus::Overdue, &[FormStatus::Pending], at)
    }

    /// Move to `COMPLETED` from `PENDING` or `OVERDUE`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTransition`] when already completed.
    pub fn complete(&mut self, at: Timestamp) -> Result<(), CareOpsError> {
        self.transition(
            FormStatus::Completed,
            &[FormStatus::Pending, FormStatus::Overdue],
            at,
        )
    }

    fn transition(
        &mut self,
        to: FormStatus,
        allowed_from: &[FormStatus],
        at: Timestamp,
    ) -> Result<(), CareOpsError> {
        if !allowed_from.contains(&self.status) {
            return Err(ValidationError::InvalidTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            }
            .into());
        }
        self.status = to;
        self.updated_at = at;
        Ok(())
    }
}
