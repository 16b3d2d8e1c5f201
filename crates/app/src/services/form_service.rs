//! Form service: intake forms and their follow-up.

use std::sync::Arc;

use careops_domain::contact::Contact;
use careops_domain::error::{CareOpsError, NotFoundError};
use careops_domain::form::FormSubmission;
use careops_domain::id::{FormSubmissionId, WorkspaceId};
use careops_domain::time::now;

use crate::ports::{ContactRepository, Dispatcher, FormRepository};
use crate::triggers::{DispatchMode, trigger_form_overdue, trigger_form_pending};

/// Application service for form submissions.
pub struct FormService<FR, CR, D> {
    forms: FR,
    contacts: CR,
    dispatcher: Arc<D>,
}

impl<FR, CR, D> FormService<FR, CR, D>
where
    FR: FormRepository,
    CR: ContactRepository,
    D: Dispatcher + Send + Sync + 'static,
{
    /// Create a new service backed by the given repositories and dispatcher.
    pub fn new(forms: FR, contacts: CR, dispatcher: Arc<D>) -> Self {
        Self {
            forms,
            contacts,
            dispatcher,
        }
    }

    /// Record a pending submission and fire `FORM_PENDING` without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::NotFound`] if a contact is given but is not
    /// in the workspace, or a storage error from either repository.
    #[tracing::instrument(skip(self, submission), fields(form_name = %submission.form_name))]
    pub async fn submit_form(
        &self,
        submission: FormSubmission,
    ) -> Result<FormSubmission, CareOpsError> {
        let contact = self.contact_of(&submission).await?;
        let created = self.forms.create(submission).await?;
        trigger_form_pending(
            &self.dispatcher,
            created.clone(),
            contact,
            DispatchMode::Detached,
        )
        .await;
        Ok(created)
    }

    /// Move a pending submission to `OVERDUE` and run the `FORM_OVERDUE`
    /// automations before returning.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::NotFound`] if the submission is not in the
    /// workspace, [`CareOpsError::Validation`] if it is not pending, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn mark_overdue(
        &self,
        workspace_id: WorkspaceId,
        id: FormSubmissionId,
    ) -> Result<FormSubmission, CareOpsError> {
        let mut submission = self.get_submission(workspace_id, id).await?;
        submission.mark_overdue(now())?;
        let updated = self.forms.update(submission).await?;
        let contact = self.contact_of(&updated).await?;
        trigger_form_overdue(
            &self.dispatcher,
            updated.clone(),
            contact,
            DispatchMode::Wait,
        )
        .await;
        Ok(updated)
    }

    /// Mark a submission as completed.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::NotFound`] if the submission is not in the
    /// workspace, [`CareOpsError::Validation`] if it is already completed,
    /// or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn complete(
        &self,
        workspace_id: WorkspaceId,
        id: FormSubmissionId,
    ) -> Result<FormSubmission, CareOpsError> {
        let mut submission = self.get_submission(workspace_id, id).await?;
        submission.complete(now())?;
        self.forms.update(submission).await
    }

    /// List the submissions of a workspace.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_submissions(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<FormSubmission>, CareOpsError> {
        self.forms.list_by_workspace(workspace_id).await
    }

    async fn get_submission(
        &self,
        workspace_id: WorkspaceId,
        id: FormSubmissionId,
    ) -> Result<FormSubmission, CareOpsError> {
        self.forms
            .get_by_id(workspace_id, id)
            .await?
            .ok_or_else(|| {
                NotFoundError {
                    entity: "FormSubmission",
                    id: id.to_string(),
                }
                .into()
            })
    }

    async fn contact_of(
        &self,
        submission: &FormSubmission,
    ) -> Result<Option<Contact>, CareOpsError> {
        let Some(contact_id) = submission.contact_id else {
            return Ok(None);
        };
        let contact = self
            .contacts
            .get_by_id(submission.workspace_id, contact_id)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Contact",
                id: contact_id.to_string(),
            })?;
        Ok(Some(contact))
    }
}
