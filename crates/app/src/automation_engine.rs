//! Automation engine: reacts to triggers by running matching rules.
//!
//! For each dispatch the engine loads the active rules of the context's
//! workspace that subscribe to the trigger, then runs each rule's action in
//! load order. Rules run one after the other; a failing rule is logged and
//! the next one still runs. Successful runs bump the rule's execution
//! counter.

use std::future::Future;

use tracing::{Instrument, debug, error, info, warn};

use careops_domain::alert::{Alert, NewAlert};
use careops_domain::automation::{
    Action, AlertConfig, AutomationRule, CONTACT_ENTITY, EmailConfig, EventContext, SmsConfig,
    StatusConfig, TemplateValues, Trigger, substitute,
};
use careops_domain::contact::ContactStatus;
use careops_domain::error::{CareOpsError, NotFoundError};
use careops_domain::time::now;

use crate::ports::realtime::ALERT_NEW;
use crate::ports::{
    AlertRepository, AutomationRepository, ContactRepository, Dispatcher, EmailMessage,
    EmailSender, RealtimeBroadcaster, WorkspaceRepository,
};

/// Trigger dispatcher plus the four action executors.
pub struct AutomationEngine<AR, WR, CR, LR, M, B> {
    rules: AR,
    workspaces: WR,
    contacts: CR,
    alerts: LR,
    mailer: M,
    broadcaster: B,
}

impl<AR, WR, CR, LR, M, B> AutomationEngine<AR, WR, CR, LR, M, B>
where
    AR: AutomationRepository + Send + Sync,
    WR: WorkspaceRepository + Send + Sync,
    CR: ContactRepository + Send + Sync,
    LR: AlertRepository + Send + Sync,
    M: EmailSender + Send + Sync,
    B: RealtimeBroadcaster + Send + Sync,
{
    /// Create a new engine.
    pub fn new(
        rules: AR,
        workspaces: WR,
        contacts: CR,
        alerts: LR,
        mailer: M,
        broadcaster: B,
    ) -> Self {
        Self {
            rules,
            workspaces,
            contacts,
            alerts,
            mailer,
            broadcaster,
        }
    }

    /// Run every active rule of `context.workspace_id` subscribed to `trigger`.
    ///
    /// Never fails: a rule that cannot be loaded ends the dispatch, a rule
    /// that fails is skipped, both with an `error!` log line.
    pub async fn run(&self, trigger: Trigger, context: &EventContext) {
        let rules = match self.rules.find_active(context.workspace_id, trigger).await {
            Ok(rules) => rules,
            Err(err) => {
                error!(
                    %trigger,
                    workspace_id = %context.workspace_id,
                    error = %err,
                    "failed to load automation rules"
                );
                return;
            }
        };
        debug!(%trigger, count = rules.len(), "dispatching automation rules");

        for rule in &rules {
            if let Err(err) = self.execute(rule, context).await {
                error!(
                    rule_id = %rule.id,
                    rule_name = %rule.name,
                    action = rule.action.kind(),
                    error = %err,
                    "automation rule failed"
                );
                continue;
            }
            if let Err(err) = self.rules.record_execution(rule.id, now()).await {
                error!(rule_id = %rule.id, error = %err, "failed to record rule execution");
            }
        }
    }

    async fn execute(
        &self,
        rule: &AutomationRule,
        context: &EventContext,
    ) -> Result<(), CareOpsError> {
        match &rule.action {
            Action::SendEmail(config) => self.send_email(config, context).await,
            Action::SendSms(config) => {
                send_sms(rule, config, context);
                Ok(())
            }
            Action::CreateAlert(config) => self.create_alert(config, context).await,
            Action::UpdateStatus(config) => self.update_status(config, context).await,
        }
    }

    async fn send_email(
        &self,
        config: &EmailConfig,
        context: &EventContext,
    ) -> Result<(), CareOpsError> {
        let Some(to) = context.recipient() else {
            warn!(workspace_id = %context.workspace_id, "no recipient email, skipping SEND_EMAIL");
            return Ok(());
        };

        let workspace_name = if context.business_name.is_some() {
            None
        } else {
            self.workspaces
                .get_by_id(context.workspace_id)
                .await?
                .map(|workspace| workspace.business_name)
        };
        let values = TemplateValues::from_context(context, workspace_name.as_deref());

        let message = EmailMessage {
            to: to.to_string(),
            subject: substitute(&config.subject, &values),
            html: substitute(&config.template, &values),
            from: config.from.clone(),
        };
        self.mailer.send(message).await
    }

    async fn create_alert(
        &self,
        config: &AlertConfig,
        context: &EventContext,
    ) -> Result<(), CareOpsError> {
        let alert = Alert::raise(
            NewAlert {
                workspace_id: context.workspace_id,
                alert_type: config.alert_type.clone(),
                priority: config.priority,
                title: config.title.clone(),
                message: config.message.clone(),
                entity_type: context.entity_type.clone(),
                entity_id: context.entity_id.clone(),
            },
            now(),
        );
        let alert = self.alerts.create(alert).await?;

        match serde_json::to_value(&alert) {
            Ok(payload) => {
                self.broadcaster
                    .emit_to_workspace(alert.workspace_id, ALERT_NEW, payload);
            }
            Err(err) => warn!(alert_id = %alert.id, error = %err, "failed to encode alert"),
        }
        Ok(())
    }

    async fn update_status(
        &self,
        config: &StatusConfig,
        context: &EventContext,
    ) -> Result<(), CareOpsError> {
        if config.entity_type != CONTACT_ENTITY {
            debug!(entity_type = %config.entity_type, "UPDATE_STATUS ignored for entity type");
            return Ok(());
        }
        let Some(contact_id) = context.contact_id else {
            debug!("UPDATE_STATUS ignored, no contact in context");
            return Ok(());
        };

        let status: ContactStatus = config.status.parse()?;
        self.contacts
            .update_status(context.workspace_id, contact_id, status, now())
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Contact",
                id: contact_id.to_string(),
            })?;
        Ok(())
    }
}

fn send_sms(rule: &AutomationRule, config: &SmsConfig, context: &EventContext) {
    info!(
        rule_id = %rule.id,
        workspace_id = %context.workspace_id,
        contact_id = ?context.contact_id,
        message = %config.message,
        "SMS sending is not wired to a provider, logging only"
    );
}

impl<AR, WR, CR, LR, M, B> Dispatcher for AutomationEngine<AR, WR, CR, LR, M, B>
where
    AR: AutomationRepository + Send + Sync,
    WR: WorkspaceRepository + Send + Sync,
    CR: ContactRepository + Send + Sync,
    LR: AlertRepository + Send + Sync,
    M: EmailSender + Send + Sync,
    B: RealtimeBroadcaster + Send + Sync,
{
    fn dispatch(&self, trigger: Trigger, context: EventContext) -> impl Future<Output = ()> + Send {
        let span =
            tracing::info_span!("dispatch", %trigger, workspace_id = %context.workspace_id);
        async move { self.run(trigger, &context).await }.instrument(span)
    }
}
