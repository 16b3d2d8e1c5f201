//! Alert service: the operator side of the alert lifecycle.

use careops_domain::alert::{Alert, AlertStatus};
use careops_domain::error::{CareOpsError, NotFoundError};
use careops_domain::id::{AlertId, WorkspaceId};
use careops_domain::time::now;

use crate::ports::realtime::ALERT_UPDATED;
use crate::ports::{AlertRepository, RealtimeBroadcaster};

/// Application service for alerts.
pub struct AlertService<R, B> {
    repo: R,
    broadcaster: B,
}

impl<R, B> AlertService<R, B>
where
    R: AlertRepository,
    B: RealtimeBroadcaster,
{
    /// Create a new service backed by the given repository and broadcaster.
    pub fn new(repo: R, broadcaster: B) -> Self {
        Self { repo, broadcaster }
    }

    /// List the alerts of a workspace, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_alerts(
        &self,
        workspace_id: WorkspaceId,
        status: Option<AlertStatus>,
    ) -> Result<Vec<Alert>, CareOpsError> {
        self.repo.list_by_workspace(workspace_id, status).await
    }

    /// Mark an active alert as acknowledged.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::NotFound`] if the alert is not in the
    /// workspace, [`CareOpsError::Validation`] unless it is active, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn acknowledge(
        &self,
        workspace_id: WorkspaceId,
        id: AlertId,
    ) -> Result<Alert, CareOpsError> {
        let mut alert = self.get_alert(workspace_id, id).await?;
        alert.acknowledge(now())?;
        self.save_and_announce(alert).await
    }

    /// Resolve an alert that is not yet resolved.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::NotFound`] if the alert is not in the
    /// workspace, [`CareOpsError::Validation`] if it is already resolved, or
    /// a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(
        &self,
        workspace_id: WorkspaceId,
        id: AlertId,
    ) -> Result<Alert, CareOpsError> {
        let mut alert = self.get_alert(workspace_id, id).await?;
        alert.resolve(now())?;
        self.save_and_announce(alert).await
    }

    async fn get_alert(
        &self,
        workspace_id: WorkspaceId,
        id: AlertId,
    ) -> Result<Alert, CareOpsError> {
        self.repo
            .get_by_id(workspace_id, id)
            .await?
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Alert",
                    id: id.to_string(),
                }
                .into()
            })
    }

    async fn save_and_announce(&self, alert: Alert) -> Result<Alert, CareOpsError> {
        let alert = self.repo.update(alert).await?;
        match serde_json::to_value(&alert) {
            Ok(payload) => {
                self.broadcaster
                    .emit_to_workspace(alert.workspace_id, ALERT_UPDATED, payload);
            }
            Err(err) => {
                tracing::warn!(alert_id = %alert.id, error = %err, "failed to encode alert");
            }
        }
        Ok(alert)
    }
}
