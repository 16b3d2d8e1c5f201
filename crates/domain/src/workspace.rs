//! Workspace: the tenant boundary.
//!
//! Every contact, booking, inventory item, alert and automation rule is
//! owned by exactly one workspace and is never shared across workspaces.

use serde::{Deserialize, Serialize};

use crate::contact::validate_email;
use crate::error::{CareOpsError, ValidationError};
use crate::id::WorkspaceId;
use crate::time::{Timestamp, now};

/// A tenant: one small business using CareOps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    /// Display name, substituted for `{{businessName}}` in email templates.
    pub business_name: String,
    pub owner_email: Option<String>,
    pub created_at: Timestamp,
}

impl Workspace {
    /// Create a new workspace with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::Validation`] when `business_name` is blank or
    /// `owner_email` is not a plausible address.
    pub fn new(
        business_name: impl Into<String>,
        owner_email: Option<String>,
    ) -> Result<Self, CareOpsError> {
        let workspace = Self {
            id: WorkspaceId::new(),
            business_name: business_name.into().trim().to_string(),
            owner_email,
            created_at: now(),
        };
        workspace.validate()?;
        Ok(workspace)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::Validation`] when an invariant is violated.
    pub fn validate(&self) -> Result<(), CareOpsError> {
        if self.business_name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if let Some(email) = &self.owner_email {
            validate_email(email)?;
        }
        Ok(())
    }
}
