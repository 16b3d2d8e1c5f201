//! Event context: the data an emission site hands to the dispatcher.
//!
//! Lives for a single dispatch call and is never persisted.

use serde::Serialize;

use crate::booking::Booking;
use crate::contact::Contact;
use crate::form::{self, FormSubmission};
use crate::id::{ContactId, WorkspaceId};
use crate::inventory::{self, InventoryItem};

/// Bundle of domain objects relevant to one trigger.
#[derive(Debug, Clone, Serialize)]
pub struct EventContext {
    pub workspace_id: WorkspaceId,
    pub contact: Option<Contact>,
    pub contact_id: Option<ContactId>,
    pub booking: Option<Booking>,
    pub form_submission: Option<FormSubmission>,
    pub inventory_item: Option<InventoryItem>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    /// Takes precedence over the workspace's own business name.
    pub business_name: Option<String>,
}

impl EventContext {
    /// An empty context scoped to `workspace_id`.
    #[must_use]
    pub fn new(workspace_id: WorkspaceId) -> Self {
        Self {
            workspace_id,
            contact: None,
            contact_id: None,
            booking: None,
            form_submission: None,
            inventory_item: None,
            entity_type: None,
            entity_id: None,
            business_name: None,
        }
    }

    /// Attach a contact; also sets `contact_id`.
    #[must_use]
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact_id = Some(contact.id);
        self.contact = Some(contact);
        self
    }

    #[must_use]
    pub fn with_contact_id(mut self, contact_id: ContactId) -> Self {
        self.contact_id = Some(contact_id);
        self
    }

    #[must_use]
    pub fn with_booking(mut self, booking: Booking) -> Self {
        self.booking = Some(booking);
        self
    }

    /// Attach a form submission and point `entity_type`/`entity_id` at it.
    #[must_use]
    pub fn with_form_submission(mut self, submission: FormSubmission) -> Self {
        self.entity_type = Some(form::ENTITY_TYPE.to_string());
        self.entity_id = Some(submission.id.to_string());
        self.form_submission = Some(submission);
        self
    }

    /// Attach an inventory item and point `entity_type`/`entity_id` at it.
    #[must_use]
    pub fn with_inventory_item(mut self, item: InventoryItem) -> Self {
        self.entity_type = Some(inventory::ENTITY_TYPE.to_string());
        self.entity_id = Some(item.id.to_string());
        self.inventory_item = Some(item);
        self
    }

    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    #[must_use]
    pub fn with_business_name(mut self, business_name: impl Into<String>) -> Self {
        self.business_name = Some(business_name.into());
        self
    }

    /// Email address of the context contact, if any.
    #[must_use]
    pub fn recipient(&self) -> Option<&str> {
        self.contact
            .as_ref()
            .and_then(|contact| contact.email.as_deref())
            .filter(|email| !email.trim().is_empty())
    }
}
