//! Storage port: repository traits for the records automations react to.
//!
//! Every lookup except workspace lookups is scoped by [`WorkspaceId`]: a
//! record owned by another workspace is reported as absent.

use std::future::Future;

use careops_domain::alert::{Alert, AlertStatus};
use careops_domain::booking::Booking;
use careops_domain::contact::{Contact, ContactStatus};
use careops_domain::error::CareOpsError;
use careops_domain::form::FormSubmission;
use careops_domain::id::{AlertId, ContactId, FormSubmissionId, InventoryItemId, WorkspaceId};
use careops_domain::inventory::InventoryItem;
use careops_domain::time::Timestamp;
use careops_domain::workspace::Workspace;

/// Repository for [`Workspace`]s.
pub trait WorkspaceRepository {
    fn create(
        &self,
        workspace: Workspace,
    ) -> impl Future<Output = Result<Workspace, CareOpsError>> + Send;

    fn get_by_id(
        &self,
        id: WorkspaceId,
    ) -> impl Future<Output = Result<Option<Workspace>, CareOpsError>> + Send;
}

/// Repository for [`Contact`]s.
pub trait ContactRepository {
    fn create(&self, contact: Contact)
    -> impl Future<Output = Result<Contact, CareOpsError>> + Send;

    fn get_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: ContactId,
    ) -> impl Future<Output = Result<Option<Contact>, CareOpsError>> + Send;

    /// Contacts of a workspace, newest first.
    fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Vec<Contact>, CareOpsError>> + Send;

    /// Overwrite the status column only. Returns `None` when the contact
    /// does not exist in `workspace_id`.
    fn update_status(
        &self,
        workspace_id: WorkspaceId,
        id: ContactId,
        status: ContactStatus,
        at: Timestamp,
    ) -> impl Future<Output = Result<Option<Contact>, CareOpsError>> + Send;
}

/// Repository for [`Booking`]s.
pub trait BookingRepository {
    fn create(&self, booking: Booking)
    -> impl Future<Output = Result<Booking, CareOpsError>> + Send;

    /// Bookings of a workspace ordered by `scheduled_at`.
    fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Vec<Booking>, CareOpsError>> + Send;
}

/// Repository for [`InventoryItem`]s.
pub trait InventoryRepository {
    fn create(
        &self,
        item: InventoryItem,
    ) -> impl Future<Output = Result<InventoryItem, CareOpsError>> + Send;

    fn get_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: InventoryItemId,
    ) -> impl Future<Output = Result<Option<InventoryItem>, CareOpsError>> + Send;

    /// Items of a workspace ordered by name.
    fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Vec<InventoryItem>, CareOpsError>> + Send;

    fn update(
        &self,
        item: InventoryItem,
    ) -> impl Future<Output = Result<InventoryItem, CareOpsError>> + Send;
}

/// Repository for [`FormSubmission`]s.
pub trait FormRepository {
    fn create(
        &self,
        submission: FormSubmission,
    ) -> impl Future<Output = Result<FormSubmission, CareOpsError>> + Send;

    fn get_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: FormSubmissionId,
    ) -> impl Future<Output = Result<Option<FormSubmission>, CareOpsError>> + Send;

    /// Submissions of a workspace, newest first.
    fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Vec<FormSubmission>, CareOpsError>> + Send;

    fn update(
        &self,
        submission: FormSubmission,
    ) -> impl Future<Output = Result<FormSubmission, CareOpsError>> + Send;
}

/// Repository for [`Alert`]s.
pub trait AlertRepository {
    fn create(&self, alert: Alert) -> impl Future<Output = Result<Alert, CareOpsError>> + Send;

    fn get_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: AlertId,
    ) -> impl Future<Output = Result<Option<Alert>, CareOpsError>> + Send;

    /// Alerts of a workspace, newest first, optionally filtered by status.
    fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
        status: Option<AlertStatus>,
    ) -> impl Future<Output = Result<Vec<Alert>, CareOpsError>> + Send;

    fn update(&self, alert: Alert) -> impl Future<Output = Result<Alert, CareOpsError>> + Send;
}
