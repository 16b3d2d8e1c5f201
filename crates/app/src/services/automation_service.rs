//! Automation service: use-cases for managing a workspace's rules.

use careops_domain::automation::AutomationRule;
use careops_domain::error::{CareOpsError, NotFoundError};
use careops_domain::id::{AutomationRuleId, WorkspaceId};

use crate::ports::AutomationRepository;

/// Application service for automation rule CRUD.
///
/// Every operation is scoped to a workspace: a rule owned by another
/// workspace is reported as not found.
pub struct AutomationService<R> {
    repo: R,
}

impl<R: AutomationRepository> AutomationService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new rule after validating its name and action config.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, rule), fields(rule_name = %rule.name))]
    pub async fn create_rule(&self, rule: AutomationRule) -> Result<AutomationRule, CareOpsError> {
        rule.validate()?;
        self.repo.create(rule).await
    }

    /// Look up a rule of `workspace_id`, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::NotFound`] when the rule does not exist or
    /// belongs to another workspace, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_rule(
        &self,
        workspace_id: WorkspaceId,
        id: AutomationRuleId,
    ) -> Result<AutomationRule, CareOpsError> {
        self.repo
            .get_by_id(id)
            .await?
            .filter(|rule| rule.workspace_id == workspace_id)
            .ok_or_else(|| {
                NotFoundError {
                    entity: "AutomationRule",
                    id: id.to_string(),
                }
                .into()
            })
    }

    /// List the rules of a workspace.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rules(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<AutomationRule>, CareOpsError> {
        self.repo.list_by_workspace(workspace_id).await
    }

    /// Replace the editable fields of an existing rule.
    ///
    /// Ownership, execution metadata and creation time are taken from the
    /// stored rule, not from `rule`.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::NotFound`] if the rule is not in the
    /// workspace, [`CareOpsError::Validation`] if invariants fail, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, rule), fields(rule_id = %rule.id))]
    pub async fn update_rule(
        &self,
        workspace_id: WorkspaceId,
        mut rule: AutomationRule,
    ) -> Result<AutomationRule, CareOpsError> {
        let existing = self.get_rule(workspace_id, rule.id).await?;
        rule.workspace_id = existing.workspace_id;
        rule.execution_count = existing.execution_count;
        rule.last_executed_at = existing.last_executed_at;
        rule.created_at = existing.created_at;
        rule.validate()?;
        self.repo.update(rule).await
    }

    /// Flip a rule between active and inactive.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::NotFound`] if the rule is not in the
    /// workspace, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_rule(
        &self,
        workspace_id: WorkspaceId,
        id: AutomationRuleId,
    ) -> Result<AutomationRule, CareOpsError> {
        let mut rule = self.get_rule(workspace_id, id).await?;
        rule.toggle();
        self.repo.update(rule).await
    }

    /// Delete a rule of the workspace.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::NotFound`] if the rule is not in the
    /// workspace, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_rule(
        &self,
        workspace_id: WorkspaceId,
        id: AutomationRuleId,
    ) -> Result<(), CareOpsError> {
        self.get_rule(workspace_id, id).await?;
        self.repo.delete(id).await
    }
}
