//! Contact service: capture contacts and move them through the pipeline.

use std::sync::Arc;

use careops_domain::contact::{Contact, ContactStatus};
use careops_domain::error::{CareOpsError, NotFoundError};
use careops_domain::id::{ContactId, WorkspaceId};
use careops_domain::time::now;

use crate::ports::{ContactRepository, Dispatcher};
use crate::triggers::{DispatchMode, trigger_new_contact};

/// Application service for contacts.
pub struct ContactService<R, D> {
    repo: R,
    dispatcher: Arc<D>,
}

impl<R, D> ContactService<R, D>
where
    R: ContactRepository,
    D: Dispatcher + Send + Sync + 'static,
{
    /// Create a new service backed by the given repository and dispatcher.
    pub fn new(repo: R, dispatcher: Arc<D>) -> Self {
        Self { repo, dispatcher }
    }

    /// Create a contact and fire `NEW_CONTACT` without waiting for the
    /// automations to finish.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, contact), fields(workspace_id = %contact.workspace_id))]
    pub async fn create_contact(&self, mut contact: Contact) -> Result<Contact, CareOpsError> {
        contact.validate()?;
        let ts = now();
        contact.created_at = ts;
        contact.updated_at = ts;
        let created = self.repo.create(contact).await?;
        trigger_new_contact(&self.dispatcher, created.clone(), DispatchMode::Detached).await;
        Ok(created)
    }

    /// Look up a contact of the workspace.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::NotFound`] when the contact is not in the
    /// workspace, or a storage error from the repository.
    pub async fn get_contact(
        &self,
        workspace_id: WorkspaceId,
        id: ContactId,
    ) -> Result<Contact, CareOpsError> {
        self.repo
            .get_by_id(workspace_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// List the contacts of a workspace.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_contacts(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Contact>, CareOpsError> {
        self.repo.list_by_workspace(workspace_id).await
    }

    /// Set a contact's pipeline status.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::NotFound`] when the contact is not in the
    /// workspace, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(
        &self,
        workspace_id: WorkspaceId,
        id: ContactId,
        status: ContactStatus,
    ) -> Result<Contact, CareOpsError> {
        self.repo
            .update_status(workspace_id, id, status, now())
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: ContactId) -> CareOpsError {
    NotFoundError {
        entity: "Contact",
        id: id.to_string(),
    }
    .into()
}
