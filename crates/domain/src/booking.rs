//! Booking: an appointment a contact has made with the business.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CareOpsError, ValidationError};
use crate::id::{BookingId, ContactId, WorkspaceId};
use crate::time::{Timestamp, now};

/// Lifecycle of a booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Cancelled,
    Completed,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        })
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(Self::Confirmed),
            "CANCELLED" => Ok(Self::Cancelled),
            "COMPLETED" => Ok(Self::Completed),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

/// A scheduled appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub workspace_id: WorkspaceId,
    pub contact_id: ContactId,
    /// Name of the booked service, substituted for `{{serviceName}}`.
    pub service_name: String,
    pub scheduled_at: Timestamp,
    pub duration_minutes: u32,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

impl Booking {
    /// Create a builder for constructing a [`Booking`].
    #[must_use]
    pub fn builder() -> BookingBuilder {
        BookingBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::Validation`] when `service_name` is blank or
    /// `duration_minutes` is zero.
    pub fn validate(&self) -> Result<(), CareOpsError> {
        if self.service_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("service_name").into());
        }
        if self.duration_minutes == 0 {
            return Err(ValidationError::InvalidDuration.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Booking`].
#[derive(Debug, Default)]
pub struct BookingBuilder {
    id: Option<BookingId>,
    workspace_id: Option<WorkspaceId>,
    contact_id: Option<ContactId>,
    service_name: Option<String>,
    scheduled_at: Option<Timestamp>,
    duration_minutes: Option<u32>,
    notes: Option<String>,
}

impl BookingBuilder {
    #[must_use]
    pub fn id(mut self, id: BookingId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn workspace_id(mut self, workspace_id: WorkspaceId) -> Self {
        self.workspace_id = Some(workspace_id);
        self
    }

    #[must_use]
    pub fn contact_id(mut self, contact_id: ContactId) -> Self {
        self.contact_id = Some(contact_id);
        self
    }

    #[must_use]
    pub fn service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    #[must_use]
    pub fn scheduled_at(mut self, scheduled_at: Timestamp) -> Self {
        self.scheduled_at = Some(scheduled_at);
        self
    }

    #[must_use]
    pub fn duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Consume the builder, validate, and return a [`Booking`].
    ///
    /// Defaults: 30 minute duration, scheduled now, status `CONFIRMED`.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::Validation`] if invariants fail.
    pub fn build(self) -> Result<Booking, CareOpsError> {
        let booking = Booking {
            id: self.id.unwrap_or_default(),
            workspace_id: self.workspace_id.unwrap_or_default(),
            contact_id: self.contact_id.unwrap_or_default(),
            service_name: self.service_name.unwrap_or_default(),
            scheduled_at: self.scheduled_at.unwrap_or_else(now),
            duration_minutes: self.duration_minutes.unwrap_or(30),
            status: BookingStatus::Confirmed,
            notes: self.notes,
            created_at: now(),
        };
        booking.validate()?;
        Ok(booking)
    }
}
