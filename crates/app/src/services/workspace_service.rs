//! Workspace service: registration and lookup.

use careops_domain::automation::default_rules;
use careops_domain::error::{CareOpsError, NotFoundError};
use careops_domain::id::WorkspaceId;
use careops_domain::workspace::Workspace;

use crate::ports::{AutomationRepository, WorkspaceRepository};

/// Application service for workspaces.
pub struct WorkspaceService<WR, AR> {
    workspaces: WR,
    rules: AR,
}

impl<WR, AR> WorkspaceService<WR, AR>
where
    WR: WorkspaceRepository,
    AR: AutomationRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(workspaces: WR, rules: AR) -> Self {
        Self { workspaces, rules }
    }

    /// Register a workspace and seed its starter automation rules.
    ///
    /// The two writes are not atomic: the workspace is committed first, so
    /// when seeding fails it stays registered without starter rules. Rules
    /// can still be added to it one by one.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::Validation`] for a blank name or malformed
    /// owner email, or a storage error from either repository.
    #[tracing::instrument(skip(self, owner_email))]
    pub async fn register(
        &self,
        business_name: &str,
        owner_email: Option<String>,
    ) -> Result<Workspace, CareOpsError> {
        let workspace = Workspace::new(business_name, owner_email)?;
        let workspace = self.workspaces.create(workspace).await?;
        self.rules.create_many(default_rules(workspace.id)).await?;
        tracing::info!(workspace_id = %workspace.id, "workspace registered");
        Ok(workspace)
    }

    /// Look up a workspace by id.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::NotFound`] when no workspace with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_workspace(&self, id: WorkspaceId) -> Result<Workspace, CareOpsError> {
        self.workspaces.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Workspace",
                id: id.to_string(),
            }
            .into()
        })
    }
}
