//! Trigger emission: package a freshly written record into an
//! [`EventContext`] and hand it to the dispatcher.
//!
//! Each entry point takes an explicit [`DispatchMode`]: callers either wait
//! for every rule to finish or detach the dispatch onto the runtime and
//! return immediately.

use std::sync::Arc;

use careops_domain::automation::{EventContext, Trigger};
use careops_domain::booking::Booking;
use careops_domain::contact::Contact;
use careops_domain::form::FormSubmission;
use careops_domain::inventory::InventoryItem;

use crate::ports::Dispatcher;

/// Whether the emitting call site waits for rule execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Await the dispatcher before returning.
    Wait,
    /// Spawn the dispatch as a background task; no handle is kept.
    Detached,
}

/// Emit `NEW_CONTACT` for a contact that was just created.
pub async fn trigger_new_contact<D>(dispatcher: &Arc<D>, contact: Contact, mode: DispatchMode)
where
    D: Dispatcher + Send + Sync + 'static,
{
    let context = EventContext::new(contact.workspace_id).with_contact(contact);
    emit(dispatcher, Trigger::NewContact, context, mode).await;
}

/// Emit `BOOKING_CREATED`. The booked contact, when known, provides the
/// email recipient and name placeholders.
pub async fn trigger_booking_created<D>(
    dispatcher: &Arc<D>,
    booking: Booking,
    contact: Option<Contact>,
    mode: DispatchMode,
) where
    D: Dispatcher + Send + Sync + 'static,
{
    let mut context = EventContext::new(booking.workspace_id).with_contact_id(booking.contact_id);
    if let Some(contact) = contact {
        context = context.with_contact(contact);
    }
    let context = context.with_booking(booking);
    emit(dispatcher, Trigger::BookingCreated, context, mode).await;
}

/// Emit `FORM_PENDING` for a new submission.
pub async fn trigger_form_pending<D>(
    dispatcher: &Arc<D>,
    submission: FormSubmission,
    contact: Option<Contact>,
    mode: DispatchMode,
) where
    D: Dispatcher + Send + Sync + 'static,
{
    let context = form_context(submission, contact);
    emit(dispatcher, Trigger::FormPending, context, mode).await;
}

/// Emit `FORM_OVERDUE` for a submission that passed its due date.
pub async fn trigger_form_overdue<D>(
    dispatcher: &Arc<D>,
    submission: FormSubmission,
    contact: Option<Contact>,
    mode: DispatchMode,
) where
    D: Dispatcher + Send + Sync + 'static,
{
    let context = form_context(submission, contact);
    emit(dispatcher, Trigger::FormOverdue, context, mode).await;
}

/// Emit `INVENTORY_LOW` for an item at or below its threshold.
pub async fn trigger_inventory_low<D>(dispatcher: &Arc<D>, item: InventoryItem, mode: DispatchMode)
where
    D: Dispatcher + Send + Sync + 'static,
{
    let context = EventContext::new(item.workspace_id).with_inventory_item(item);
    emit(dispatcher, Trigger::InventoryLow, context, mode).await;
}

fn form_context(submission: FormSubmission, contact: Option<Contact>) -> EventContext {
    let mut context = EventContext::new(submission.workspace_id);
    if let Some(contact_id) = submission.contact_id {
        context = context.with_contact_id(contact_id);
    }
    if let Some(contact) = contact {
        context = context.with_contact(contact);
    }
    context.with_form_submission(submission)
}

async fn emit<D>(dispatcher: &Arc<D>, trigger: Trigger, context: EventContext, mode: DispatchMode)
where
    D: Dispatcher + Send + Sync + 'static,
{
    match mode {
        DispatchMode::Wait => dispatcher.dispatch(trigger, context).await,
        DispatchMode::Detached => {
            let dispatcher = Arc::clone(dispatcher);
            tokio::spawn(async move {
                dispatcher.dispatch(trigger, context).await;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careops_domain::id::WorkspaceId;

    use crate::testing::{SpyDispatcher, settle};

    fn ana(ws: WorkspaceId) -> Contact {
        Contact::builder()
            .workspace_id(ws)
            .first_name("Ana")
            .email("ana@example.com")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_dispatch_new_contact_with_contact_context() {
        let spy = Arc::new(SpyDispatcher::default());
        let ws = WorkspaceId::new();
        let contact = ana(ws);
        let contact_id = contact.id;

        trigger_new_contact(&spy, contact, DispatchMode::Wait).await;

        let calls = spy.calls();
        assert_eq!(calls.len(), 1);
        let (trigger, ctx) = &calls[0];
        assert_eq!(*trigger, Trigger::NewContact);
        assert_eq!(ctx.workspace_id, ws);
        assert_eq!(ctx.contact_id, Some(contact_id));
        assert_eq!(ctx.recipient(), Some("ana@example.com"));
    }

    #[tokio::test]
    async fn should_dispatch_booking_with_contact_and_booking() {
        let spy = Arc::new(SpyDispatcher::default());
        let ws = WorkspaceId::new();
        let contact = ana(ws);
        let booking = Booking::builder()
            .workspace_id(ws)
            .contact_id(contact.id)
            .service_name("Cleaning")
            .build()
            .unwrap();

        trigger_booking_created(&spy, booking, Some(contact), DispatchMode::Wait).await;

        let (trigger, ctx) = spy.calls().remove(0);
        assert_eq!(trigger, Trigger::BookingCreated);
        assert_eq!(ctx.booking.unwrap().service_name, "Cleaning");
        assert!(ctx.contact.is_some());
    }

    #[tokio::test]
    async fn should_point_form_triggers_at_submission() {
        let spy = Arc::new(SpyDispatcher::default());
        let ws = WorkspaceId::new();
        let contact = ana(ws);
        let submission = FormSubmission::pending(ws, Some(contact.id), "Intake", None).unwrap();
        let submission_id = submission.id.to_string();

        trigger_form_overdue(&spy, submission, None, DispatchMode::Wait).await;

        let (trigger, ctx) = spy.calls().remove(0);
        assert_eq!(trigger, Trigger::FormOverdue);
        assert_eq!(ctx.entity_type.as_deref(), Some("form_submission"));
        assert_eq!(ctx.entity_id, Some(submission_id));
        assert_eq!(ctx.contact_id, Some(contact.id));
        assert!(ctx.contact.is_none());
    }

    #[tokio::test]
    async fn should_point_inventory_trigger_at_item() {
        let spy = Arc::new(SpyDispatcher::default());
        let ws = WorkspaceId::new();
        let item = InventoryItem::new(ws, "Gloves", 1, 5).unwrap();

        trigger_inventory_low(&spy, item, DispatchMode::Wait).await;

        let (trigger, ctx) = spy.calls().remove(0);
        assert_eq!(trigger, Trigger::InventoryLow);
        assert_eq!(ctx.entity_type.as_deref(), Some("inventory_item"));
        assert!(ctx.inventory_item.is_some());
    }

    #[tokio::test]
    async fn should_run_detached_dispatch_in_background() {
        let spy = Arc::new(SpyDispatcher::default());
        let ws = WorkspaceId::new();

        trigger_form_pending(
            &spy,
            FormSubmission::pending(ws, None, "Intake", None).unwrap(),
            None,
            DispatchMode::Detached,
        )
        .await;

        assert!(spy.calls().is_empty());
        settle().await;
        assert_eq!(spy.calls()[0].0, Trigger::FormPending);
    }
}
