//! Trigger: the domain event an automation rule subscribes to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Named domain events that rules can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trigger {
    /// A contact was captured.
    NewContact,
    /// A booking was created.
    BookingCreated,
    /// A booking is coming up. Nothing emits this yet.
    BookingReminder,
    /// A form was sent and awaits completion.
    FormPending,
    /// A pending form passed its due date.
    FormOverdue,
    /// An inventory item reached its low-stock threshold.
    InventoryLow,
}

impl Trigger {
    /// Every trigger, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::NewContact,
        Self::BookingCreated,
        Self::BookingReminder,
        Self::FormPending,
        Self::FormOverdue,
        Self::InventoryLow,
    ];

    /// Wire/storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewContact => "NEW_CONTACT",
            Self::BookingCreated => "BOOKING_CREATED",
            Self::BookingReminder => "BOOKING_REMINDER",
            Self::FormPending => "FORM_PENDING",
            Self::FormOverdue => "FORM_OVERDUE",
            Self::InventoryLow => "INVENTORY_LOW",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trigger {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|trigger| trigger.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_every_trigger_from_its_display_form() {
        for trigger in Trigger::ALL {
            let parsed: Trigger = trigger.to_string().parse().unwrap();
            assert_eq!(parsed, trigger);
        }
    }

    #[test]
    fn should_serialize_as_screaming_snake_case() {
        let json = serde_json::to_string(&Trigger::InventoryLow).unwrap();
        assert_eq!(json, "\"INVENTORY_LOW\"");
        let parsed: Trigger = serde_json::from_str("\"NEW_CONTACT\"").unwrap();
        assert_eq!(parsed, Trigger::NewContact);
    }

    #[test]
    fn should_reject_unknown_trigger_name() {
        assert!("SOMETHING_ELSE".parse::<Trigger>().is_err());
    }
}
