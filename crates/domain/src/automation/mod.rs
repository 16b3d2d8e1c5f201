//! Automation rules: trigger → action, scoped to one workspace.
//!
//! A rule subscribes to one [`Trigger`] and performs one [`Action`] when an
//! emission site reports that trigger for the rule's workspace. Rules carry
//! an opaque `conditions` object that is stored and returned but never
//! evaluated.

mod action;
mod context;
mod defaults;
mod template;
mod trigger;

pub use action::{
    Action, AlertConfig, CONTACT_ENTITY, EmailConfig, SmsConfig, StatusConfig,
};
pub use context::EventContext;
pub use defaults::default_rules;
pub use template::{PLACEHOLDERS, TemplateValues, substitute};
pub use trigger::Trigger;

use serde::{Deserialize, Serialize};

use crate::error::{CareOpsError, ValidationError};
use crate::id::{AutomationRuleId, WorkspaceId};
use crate::time::{Timestamp, now};

/// Opaque JSON object persisted with every rule.
pub type Conditions = serde_json::Map<String, serde_json::Value>;

/// A workspace-owned rule that reacts to a trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationRule {
    pub id: AutomationRuleId,
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub description: Option<String>,
    pub trigger: Trigger,
    pub action: Action,
    #[serde(default)]
    pub conditions: Conditions,
    pub is_active: bool,
    pub execution_count: u64,
    pub last_executed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl AutomationRule {
    /// Create a builder for constructing an [`AutomationRule`].
    #[must_use]
    pub fn builder() -> AutomationRuleBuilder {
        AutomationRuleBuilder::default()
    }

    pub(crate) fn seeded(
        workspace_id: WorkspaceId,
        name: &str,
        description: &str,
        trigger: Trigger,
        action: Action,
    ) -> Self {
        Self {
            id: AutomationRuleId::new(),
            workspace_id,
            name: name.to_string(),
            description: Some(description.to_string()),
            trigger,
            action,
            conditions: Conditions::new(),
            is_active: true,
            execution_count: 0,
            last_executed_at: None,
            created_at: now(),
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - the action config is unusable (see [`Action::validate`])
    pub fn validate(&self) -> Result<(), CareOpsError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        self.action.validate()?;
        Ok(())
    }

    /// Bump the execution counter after a successful run.
    pub fn record_execution(&mut self, at: Timestamp) {
        self.execution_count += 1;
        self.last_executed_at = Some(at);
    }

    /// Flip `is_active`.
    pub fn toggle(&mut self) {
        self.is_active = !self.is_active;
    }
}

/// Step-by-step builder for [`AutomationRule`].
#[derive(Debug, Default)]
pub struct AutomationRuleBuilder {
    id: Option<AutomationRuleId>,
    workspace_id: Option<WorkspaceId>,
    name: Option<String>,
    description: Option<String>,
    trigger: Option<Trigger>,
    action: Option<Action>,
    conditions: Conditions,
    is_active: Option<bool>,
    execution_count: u64,
    last_executed_at: Option<Timestamp>,
    created_at: Option<Timestamp>,
}

impl AutomationRuleBuilder {
    #[must_use]
    pub fn id(mut self, id: AutomationRuleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn workspace_id(mut self, workspace_id: WorkspaceId) -> Self {
        self.workspace_id = Some(workspace_id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = conditions;
        self
    }

    #[must_use]
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    #[must_use]
    pub fn execution_count(mut self, count: u64) -> Self {
        self.execution_count = count;
        self
    }

    #[must_use]
    pub fn last_executed_at(mut self, ts: Timestamp) -> Self {
        self.last_executed_at = Some(ts);
        self
    }

    #[must_use]
    pub fn created_at(mut self, ts: Timestamp) -> Self {
        self.created_at = Some(ts);
        self
    }

    /// Consume the builder, validate, and return an [`AutomationRule`].
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::Validation`] if the name is missing, no action
    /// was given, or the action config is invalid.
    pub fn build(self) -> Result<AutomationRule, CareOpsError> {
        let action = self
            .action
            .ok_or(ValidationError::EmptyField("action"))?;
        let rule = AutomationRule {
            id: self.id.unwrap_or_default(),
            workspace_id: self.workspace_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description,
            trigger: self.trigger.unwrap_or(Trigger::NewContact),
            action,
            conditions: self.conditions,
            is_active: self.is_active.unwrap_or(true),
            execution_count: self.execution_count,
            last_executed_at: self.last_executed_at,
            created_at: self.created_at.unwrap_or_else(now),
        };
        rule.validate()?;
        Ok(rule)
    }
}
