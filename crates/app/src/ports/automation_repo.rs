//! Automation repository port: persistence for automation rules.

use std::future::Future;

use careops_domain::automation::{AutomationRule, Trigger};
use careops_domain::error::CareOpsError;
use careops_domain::id::{AutomationRuleId, WorkspaceId};
use careops_domain::time::Timestamp;

/// Repository for persisting and querying [`AutomationRule`]s.
pub trait AutomationRepository {
    /// Create a new rule in storage.
    fn create(
        &self,
        rule: AutomationRule,
    ) -> impl Future<Output = Result<AutomationRule, CareOpsError>> + Send;

    /// Insert several rules at once (used when seeding a new workspace).
    fn create_many(
        &self,
        rules: Vec<AutomationRule>,
    ) -> impl Future<Output = Result<(), CareOpsError>> + Send;

    /// Get a rule by its unique identifier, whatever workspace owns it.
    fn get_by_id(
        &self,
        id: AutomationRuleId,
    ) -> impl Future<Output = Result<Option<AutomationRule>, CareOpsError>> + Send;

    /// All rules owned by `workspace_id`, oldest first.
    fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Vec<AutomationRule>, CareOpsError>> + Send;

    /// Active rules of `workspace_id` subscribed to `trigger`, oldest first.
    fn find_active(
        &self,
        workspace_id: WorkspaceId,
        trigger: Trigger,
    ) -> impl Future<Output = Result<Vec<AutomationRule>, CareOpsError>> + Send;

    /// Replace an existing rule.
    fn update(
        &self,
        rule: AutomationRule,
    ) -> impl Future<Output = Result<AutomationRule, CareOpsError>> + Send;

    /// Increment `execution_count` by one and set `last_executed_at`.
    ///
    /// Implementations must increment in place rather than writing back a
    /// previously read counter.
    fn record_execution(
        &self,
        id: AutomationRuleId,
        at: Timestamp,
    ) -> impl Future<Output = Result<(), CareOpsError>> + Send;

    /// Delete a rule by its unique identifier.
    fn delete(&self, id: AutomationRuleId)
    -> impl Future<Output = Result<(), CareOpsError>> + Send;
}
