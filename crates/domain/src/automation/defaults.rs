//! Starter rules inserted for every newly registered workspace.

use crate::alert::AlertPriority;
use crate::automation::{Action, AlertConfig, AutomationRule, EmailConfig, Trigger};
use crate::id::WorkspaceId;

enum Seed {
    Email {
        subject: &'static str,
        template: &'static str,
    },
    Alert {
        alert_type: &'static str,
        priority: AlertPriority,
        title: &'static str,
        message: &'static str,
    },
}

struct DefaultRule {
    name: &'static str,
    description: &'static str,
    trigger: Trigger,
    seed: Seed,
}

const DEFAULT_RULES: [DefaultRule; 3] = [
    DefaultRule {
        name: "Welcome Email",
        description: "Send a welcome email when a new contact is added",
        trigger: Trigger::NewContact,
        seed: Seed::Email {
            subject: "Welcome to {{businessName}}!",
            template: "<h2>Hi {{firstName}},</h2>\
                       <p>Thank you for reaching out to {{businessName}}. \
                       We have received your details and will be in touch shortly.</p>\
                       <p>Best regards,<br>{{businessName}}</p>",
        },
    },
    DefaultRule {
        name: "Booking Confirmation",
        description: "Send a confirmation email when a booking is created",
        trigger: Trigger::BookingCreated,
        seed: Seed::Email {
            subject: "Booking Confirmed - {{serviceName}}",
            template: "<h2>Hi {{firstName}},</h2>\
                       <p>Your booking for <strong>{{serviceName}}</strong> is confirmed.</p>\
                       <p>Date: {{bookingDate}}<br>Time: {{bookingTime}}</p>\
                       <p>See you soon,<br>{{businessName}}</p>",
        },
    },
    DefaultRule {
        name: "Low Inventory Alert",
        description: "Raise an alert when an inventory item runs low",
        trigger: Trigger::InventoryLow,
        seed: Seed::Alert {
            alert_type: "INVENTORY_LOW",
            priority: AlertPriority::High,
            title: "Low Inventory Alert",
            message: "An inventory item has reached its low stock threshold.",
        },
    },
];

impl Seed {
    fn action(&self) -> Action {
        match *self {
            Self::Email { subject, template } => Action::SendEmail(EmailConfig {
                subject: subject.to_string(),
                template: template.to_string(),
                from: None,
            }),
            Self::Alert {
                alert_type,
                priority,
                title,
                message,
            } => Action::CreateAlert(AlertConfig {
                alert_type: alert_type.to_string(),
                priority,
                title: title.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

/// Build the starter rules for `workspace_id`, all active.
#[must_use]
pub fn default_rules(workspace_id: WorkspaceId) -> Vec<AutomationRule> {
    DEFAULT_RULES
        .iter()
        .map(|rule| {
            AutomationRule::seeded(
                workspace_id,
                rule.name,
                rule.description,
                rule.trigger,
                rule.seed.action(),
            )
        })
        .collect()
}
