//! Action: the side effect a rule performs, together with its config.
//!
//! Each variant carries exactly the config its executor needs, so a rule
//! that passed [`Action::validate`] never reaches dispatch with missing keys.

use serde::{Deserialize, Serialize};

use crate::alert::AlertPriority;
use crate::contact::ContactStatus;
use crate::error::ValidationError;

/// Entity type understood by the `UPDATE_STATUS` action.
pub const CONTACT_ENTITY: &str = "contact";

/// Config for `SEND_EMAIL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Subject line; may contain `{{placeholders}}`.
    pub subject: String,
    /// HTML body; may contain `{{placeholders}}`.
    pub template: String,
    /// Overrides the sender's default `from` address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

/// Config for `SEND_SMS`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsConfig {
    #[serde(default)]
    pub message: String,
}

/// Config for `CREATE_ALERT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertConfig {
    pub alert_type: String,
    #[serde(default)]
    pub priority: AlertPriority,
    pub title: String,
    #[serde(default)]
    pub message: String,
}

/// Config for `UPDATE_STATUS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Only `"contact"` has an effect.
    pub entity_type: String,
    pub status: String,
}

/// What a rule does when it fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SendEmail(EmailConfig),
    /// Recognised but not delivered anywhere yet.
    SendSms(SmsConfig),
    CreateAlert(AlertConfig),
    UpdateStatus(StatusConfig),
}

impl Action {
    /// Wire/storage name of the action kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SendEmail(_) => "SEND_EMAIL",
            Self::SendSms(_) => "SEND_SMS",
            Self::CreateAlert(_) => "CREATE_ALERT",
            Self::UpdateStatus(_) => "UPDATE_STATUS",
        }
    }

    /// Check that the config is usable by its executor.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyField`] when a required field is blank
    /// - [`ValidationError::InvalidStatus`] when a contact status is unknown
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::SendEmail(config) => {
                require("subject", &config.subject)?;
                require("template", &config.template)
            }
            Self::SendSms(_) => Ok(()),
            Self::CreateAlert(config) => {
                require("alert_type", &config.alert_type)?;
                require("title", &config.title)
            }
            Self::UpdateStatus(config) => {
                require("entity_type", &config.entity_type)?;
                require("status", &config.status)?;
                if config.entity_type == CONTACT_ENTITY {
                    config.status.parse::<ContactStatus>()?;
                }
                Ok(())
            }
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}
