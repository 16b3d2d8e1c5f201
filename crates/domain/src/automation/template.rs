//! `{{placeholder}}` substitution for email subjects and bodies.
//!
//! Only a fixed set of tokens is recognised. Replacement is a single
//! left-to-right pass: inserted values are never rescanned, nothing is
//! escaped, and unknown tokens are copied through untouched.
//!
//! Values are inserted into HTML bodies as-is. A contact named
//! `<script>` ends up verbatim in the email.

use crate::automation::EventContext;
use crate::time::{date_label, time_label};

/// Tokens understood by [`substitute`], without their braces.
pub const PLACEHOLDERS: [&str; 7] = [
    "firstName",
    "lastName",
    "email",
    "businessName",
    "bookingDate",
    "bookingTime",
    "serviceName",
];

/// Values available to a template. Missing values render as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateValues {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub business_name: Option<String>,
    pub booking_date: Option<String>,
    pub booking_time: Option<String>,
    pub service_name: Option<String>,
}

impl TemplateValues {
    /// Collect values from the context's contact and booking.
    ///
    /// `context.business_name` wins over `workspace_business_name`.
    #[must_use]
    pub fn from_context(context: &EventContext, workspace_business_name: Option<&str>) -> Self {
        let contact = context.contact.as_ref();
        let booking = context.booking.as_ref();
        Self {
            first_name: contact.map(|c| c.first_name.clone()),
            last_name: contact.map(|c| c.last_name.clone()),
            email: contact.and_then(|c| c.email.clone()),
            business_name: context
                .business_name
                .clone()
                .or_else(|| workspace_business_name.map(str::to_string)),
            booking_date: booking.map(|b| date_label(b.scheduled_at)),
            booking_time: booking.map(|b| time_label(b.scheduled_at)),
            service_name: booking.map(|b| b.service_name.clone()),
        }
    }

    fn lookup(&self, token: &str) -> Option<&str> {
        let value = match token {
            "firstName" => &self.first_name,
            "lastName" => &self.last_name,
            "email" => &self.email,
            "businessName" => &self.business_name,
            "bookingDate" => &self.booking_date,
            "bookingTime" => &self.booking_time,
            "serviceName" => &self.service_name,
            _ => return None,
        };
        Some(value.as_deref().unwrap_or_default())
    }
}

/// Replace every recognised `{{token}}` in `template`.
#[must_use]
pub fn substitute(template: &str, values: &TemplateValues) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let token = &after_open[..end];
        match values.lookup(token) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::Booking;
    use crate::contact::Contact;
    use crate::id::WorkspaceId;
    use chrono::{TimeZone, Utc};

    fn full_values() -> TemplateValues {
        TemplateValues {
            first_name: Some("Ana".to_string()),
            last_name: Some("Lima".to_string()),
            email: Some("ana@example.com".to_string()),
            business_name: Some("Acme".to_string()),
            booking_date: Some("2026-03-14".to_string()),
            booking_time: Some("09:30".to_string()),
            service_name: Some("Cleaning".to_string()),
        }
    }

    #[test]
    fn should_fall_back_to_workspace_business_name() {
        let contact = Contact::builder().first_name("Ana").build().unwrap();
        let ctx = EventContext::new(WorkspaceId::new()).with_contact(contact);
        let values = TemplateValues::from_context(&ctx, Some("Acme"));

        let out = substitute("Hi {{firstName}}, welcome to {{businessName}}!", &values);
        assert_eq!(out, "Hi Ana, welcome to Acme!");
    }

    #[test]
    fn should_prefer_context_business_name() {
        let ctx = EventContext::new(WorkspaceId::new()).with_business_name("Override");
        let values = TemplateValues::from_context(&ctx, Some("Acme"));
        assert_eq!(substitute("{{businessName}}", &values), "Override");
    }

    #[test]
    fn should_leave_text_without_tokens_unchanged() {
        let inputs = [
            "",
            "plain text",
            "<p>No placeholders here</p>",
            "single { brace } and }} closer",
        ];
        for input in inputs {
            assert_eq!(substitute(input, &full_values()), input);
        }
    }

    #[test]
    fn should_leave_no_open_braces_when_fully_populated() {
        let template = PLACEHOLDERS
            .iter()
            .map(|token| format!("<b>{{{{{token}}}}}</b>"))
            .collect::<String>();
        let out = substitute(&template, &full_values());
        assert!(!out.contains("{{"), "unexpected leftover token in {out}");
        assert!(out.contains("Cleaning"));
    }

    #[test]
    fn should_render_missing_values_as_empty() {
        let out = substitute("[{{lastName}}][{{bookingDate}}]", &TemplateValues::default());
        assert_eq!(out, "[][]");
    }

    #[test]
    fn should_keep_unknown_and_unterminated_tokens() {
        let out = substitute("{{unknown}} {{firstName}} {{firstName", &full_values());
        assert_eq!(out, "{{unknown}} Ana {{firstName");
    }

    #[test]
    fn should_not_rescan_inserted_values() {
        let values = TemplateValues {
            first_name: Some("{{lastName}}".to_string()),
            last_name: Some("Lima".to_string()),
            ..TemplateValues::default()
        };
        assert_eq!(substitute("{{firstName}}", &values), "{{lastName}}");
    }

    #[test]
    fn should_insert_values_without_escaping() {
        let values = TemplateValues {
            first_name: Some("<b>Ana</b>".to_string()),
            ..TemplateValues::default()
        };
        assert_eq!(substitute("<p>{{firstName}}</p>", &values), "<p><b>Ana</b></p>");
    }

    #[test]
    fn should_format_booking_date_and_time() {
        let booking = Booking::builder()
            .service_name("Cleaning")
            .scheduled_at(Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap())
            .build()
            .unwrap();
        let ctx = EventContext::new(WorkspaceId::new()).with_booking(booking);
        let values = TemplateValues::from_context(&ctx, None);

        let out = substitute("{{serviceName}} on {{bookingDate}} at {{bookingTime}}", &values);
        assert_eq!(out, "Cleaning on 2026-03-14 at 09:30");
    }
}
