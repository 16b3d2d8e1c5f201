//! Alert: something in a workspace that needs a human's attention.
//!
//! Alerts are created by the `CREATE_ALERT` automation action and then
//! walked through `ACTIVE → ACKNOWLEDGED → RESOLVED` by staff.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CareOpsError, ValidationError};
use crate::id::{AlertId, WorkspaceId};
use crate::time::Timestamp;

/// How urgent an alert is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        })
    }
}

impl FromStr for AlertPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "URGENT" => Ok(Self::Urgent),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

/// Handling state of an alert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertStatus {
    #[default]
    Active,
    Acknowledged,
    Resolved,
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "ACTIVE",
            Self::Acknowledged => "ACKNOWLEDGED",
            Self::Resolved => "RESOLVED",
        })
    }
}

impl FromStr for AlertStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "ACKNOWLEDGED" => Ok(Self::Acknowledged),
            "RESOLVED" => Ok(Self::Resolved),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

/// A dashboard alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub workspace_id: WorkspaceId,
    /// Free-form category such as `INVENTORY_LOW`.
    pub alert_type: String,
    pub priority: AlertPriority,
    pub status: AlertStatus,
    pub title: String,
    pub message: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub acknowledged_at: Option<Timestamp>,
    pub resolved_at: Option<Timestamp>,
}

/// Fields needed to raise a new alert.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub workspace_id: WorkspaceId,
    pub alert_type: String,
    pub priority: AlertPriority,
    pub title: String,
    pub message: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
}

impl Alert {
    /// Raise a new `ACTIVE` alert.
    #[must_use]
    pub fn raise(new: NewAlert, at: Timestamp) -> Self {
        Self {
            id: AlertId::new(),
            workspace_id: new.workspace_id,
            alert_type: new.alert_type,
            priority: new.priority,
            status: AlertStatus::Active,
            title: new.title,
            message: new.message,
            entity_type: new.entity_type,
            entity_id: new.entity_id,
            created_at: at,
            updated_at: at,
            acknowledged_at: None,
            resolved_at: None,
        }
    }

    /// Mark an active alert as seen.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTransition`] unless the alert is `ACTIVE`.
    pub fn acknowledge(&mut self, at: Timestamp) -> Result<(), CareOpsError> {
        if self.status != AlertStatus::Active {
            return Err(self.invalid(AlertStatus::Acknowledged));
        }
        self.status = AlertStatus::Acknowledged;
        self.acknowledged_at = Some(at);
        self.updated_at = at;
        Ok(())
    }

    /// Close the alert.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTransition`] when already resolved.
    pub fn resolve(&mut self, at: Timestamp) -> Result<(), CareOpsError> {
        if self.status == AlertStatus::Resolved {
            return Err(self.invalid(AlertStatus::Resolved));
        }
        self.status = AlertStatus::Resolved;
        self.resolved_at = Some(at);
        self.updated_at = at;
        Ok(())
    }

    fn invalid(&self, to: AlertStatus) -> CareOpsError {
        ValidationError::InvalidTransition {
            from: self.status.to_string(),
            to: to.to_string(),
        }
        .into()
    }
}
