//! In-memory fakes of every port, shared by the unit tests of this crate.

use std::future::Future;
use std::sync::Mutex;

use careops_domain::alert::{Alert, AlertStatus};
use careops_domain::automation::{AutomationRule, EventContext, Trigger};
use careops_domain::booking::Booking;
use careops_domain::contact::{Contact, ContactStatus};
use careops_domain::error::CareOpsError;
use careops_domain::form::FormSubmission;
use careops_domain::id::{
    AlertId, AutomationRuleId, ContactId, FormSubmissionId, InventoryItemId, WorkspaceId,
};
use careops_domain::inventory::InventoryItem;
use careops_domain::time::Timestamp;
use careops_domain::workspace::Workspace;

use crate::ports::{
    AlertRepository, AutomationRepository, BookingRepository, ContactRepository, Dispatcher,
    EmailMessage, EmailSender, FormRepository, InventoryRepository, RealtimeBroadcaster,
    WorkspaceRepository,
};

// ── Workspaces ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryWorkspaces {
    pub store: Mutex<Vec<Workspace>>,
}

impl InMemoryWorkspaces {
    pub fn with(workspaces: Vec<Workspace>) -> Self {
        Self {
            store: Mutex::new(workspaces),
        }
    }
}

impl WorkspaceRepository for InMemoryWorkspaces {
    fn create(
        &self,
        workspace: Workspace,
    ) -> impl Future<Output = Result<Workspace, CareOpsError>> + Send {
        self.store.lock().unwrap().push(workspace.clone());
        async { Ok(workspace) }
    }

    fn get_by_id(
        &self,
        id: WorkspaceId,
    ) -> impl Future<Output = Result<Option<Workspace>, CareOpsError>> + Send {
        let r = self
            .store
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id == id)
            .cloned();
        async { Ok(r) }
    }
}

// ── Automation rules ───────────────────────────────────────────────

/// Rule store; `create_many` fails when `reject_bulk` is set.
#[derive(Default)]
pub struct InMemoryRules {
    pub store: Mutex<Vec<AutomationRule>>,
    pub reject_bulk: bool,
}

impl InMemoryRules {
    pub fn with(rules: Vec<AutomationRule>) -> Self {
        Self {
            store: Mutex::new(rules),
            reject_bulk: false,
        }
    }

    pub fn rejecting_bulk() -> Self {
        Self {
            reject_bulk: true,
            ..Self::default()
        }
    }

    pub fn get(&self, id: AutomationRuleId) -> AutomationRule {
        self.store
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .unwrap()
    }
}

impl AutomationRepository for InMemoryRules {
    fn create(
        &self,
        rule: AutomationRule,
    ) -> impl Future<Output = Result<AutomationRule, CareOpsError>> + Send {
        self.store.lock().unwrap().push(rule.clone());
        async { Ok(rule) }
    }

    fn create_many(
        &self,
        rules: Vec<AutomationRule>,
    ) -> impl Future<Output = Result<(), CareOpsError>> + Send {
        let result = if self.reject_bulk {
            Err(CareOpsError::Storage("bulk insert rejected".into()))
        } else {
            self.store.lock().unwrap().extend(rules);
            Ok(())
        };
        async { result }
    }

    fn get_by_id(
        &self,
        id: AutomationRuleId,
    ) -> impl Future<Output = Result<Option<AutomationRule>, CareOpsError>> + Send {
        let r = self
            .store
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned();
        async { Ok(r) }
    }

    fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Vec<AutomationRule>, CareOpsError>> + Send {
        let r: Vec<_> = self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.workspace_id == workspace_id)
            .cloned()
            .collect();
        async { Ok(r) }
    }

    fn find_active(
        &self,
        workspace_id: WorkspaceId,
        trigger: Trigger,
    ) -> impl Future<Output = Result<Vec<AutomationRule>, CareOpsError>> + Send {
        let r: Vec<_> = self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.workspace_id == workspace_id && r.trigger == trigger && r.is_active)
            .cloned()
            .collect();
        async { Ok(r) }
    }

    fn update(
        &self,
        rule: AutomationRule,
    ) -> impl Future<Output = Result<AutomationRule, CareOpsError>> + Send {
        let mut store = self.store.lock().unwrap();
        if let Some(slot) = store.iter_mut().find(|r| r.id == rule.id) {
            *slot = rule.clone();
        }
        async { Ok(rule) }
    }

    fn record_execution(
        &self,
        id: AutomationRuleId,
        at: Timestamp,
    ) -> impl Future<Output = Result<(), CareOpsError>> + Send {
        let mut store = self.store.lock().unwrap();
        if let Some(rule) = store.iter_mut().find(|r| r.id == id) {
            rule.record_execution(at);
        }
        async { Ok(()) }
    }

    fn delete(
        &self,
        id: AutomationRuleId,
    ) -> impl Future<Output = Result<(), CareOpsError>> + Send {
        self.store.lock().unwrap().retain(|r| r.id != id);
        async { Ok(()) }
    }
}

// ── Contacts ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryContacts {
    pub store: Mutex<Vec<Contact>>,
    pub status_writes: Mutex<usize>,
}

impl InMemoryContacts {
    pub fn with(contacts: Vec<Contact>) -> Self {
        Self {
            store: Mutex::new(contacts),
            status_writes: Mutex::new(0),
        }
    }

    pub fn status_writes(&self) -> usize {
        *self.status_writes.lock().unwrap()
    }
}

impl ContactRepository for InMemoryContacts {
    fn create(
        &self,
        contact: Contact,
    ) -> impl Future<Output = Result<Contact, CareOpsError>> + Send {
        self.store.lock().unwrap().push(contact.clone());
        async { Ok(contact) }
    }

    fn get_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: ContactId,
    ) -> impl Future<Output = Result<Option<Contact>, CareOpsError>> + Send {
        let r = self
            .store
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id && c.workspace_id == workspace_id)
            .cloned();
        async { Ok(r) }
    }

    fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Vec<Contact>, CareOpsError>> + Send {
        let r: Vec<_> = self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.workspace_id == workspace_id)
            .cloned()
            .collect();
        async { Ok(r) }
    }

    fn update_status(
        &self,
        workspace_id: WorkspaceId,
        id: ContactId,
        status: ContactStatus,
        at: Timestamp,
    ) -> impl Future<Output = Result<Option<Contact>, CareOpsError>> + Send {
        *self.status_writes.lock().unwrap() += 1;
        let mut store = self.store.lock().unwrap();
        let r = store
            .iter_mut()
            .find(|c| c.id == id && c.workspace_id == workspace_id)
            .map(|c| {
                c.status = status;
                c.updated_at = at;
                c.clone()
            });
        async { Ok(r) }
    }
}

// ── Bookings ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryBookings {
    pub store: Mutex<Vec<Booking>>,
}

impl BookingRepository for InMemoryBookings {
    fn create(
        &self,
        booking: Booking,
    ) -> impl Future<Output = Result<Booking, CareOpsError>> + Send {
        self.store.lock().unwrap().push(booking.clone());
        async { Ok(booking) }
    }

    fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Vec<Booking>, CareOpsError>> + Send {
        let r: Vec<_> = self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.workspace_id == workspace_id)
            .cloned()
            .collect();
        async { Ok(r) }
    }
}

// ── Inventory ──────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryInventory {
    pub store: Mutex<Vec<InventoryItem>>,
}

impl InventoryRepository for InMemoryInventory {
    fn create(
        &self,
        item: InventoryItem,
    ) -> impl Future<Output = Result<InventoryItem, CareOpsError>> + Send {
        self.store.lock().unwrap().push(item.clone());
        async { Ok(item) }
    }

    fn get_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: InventoryItemId,
    ) -> impl Future<Output = Result<Option<InventoryItem>, CareOpsError>> + Send {
        let r = self
            .store
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id && i.workspace_id == workspace_id)
            .cloned();
        async { Ok(r) }
    }

    fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Vec<InventoryItem>, CareOpsError>> + Send {
        let r: Vec<_> = self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.workspace_id == workspace_id)
            .cloned()
            .collect();
        async { Ok(r) }
    }

    fn update(
        &self,
        item: InventoryItem,
    ) -> impl Future<Output = Result<InventoryItem, CareOpsError>> + Send {
        let mut store = self.store.lock().unwrap();
        if let Some(slot) = store.iter_mut().find(|i| i.id == item.id) {
            *slot = item.clone();
        }
        async { Ok(item) }
    }
}

// ── Forms ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryForms {
    pub store: Mutex<Vec<FormSubmission>>,
}

impl FormRepository for InMemoryForms {
    fn create(
        &self,
        submission: FormSubmission,
    ) -> impl Future<Output = Result<FormSubmission, CareOpsError>> + Send {
        self.store.lock().unwrap().push(submission.clone());
        async { Ok(submission) }
    }

    fn get_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: FormSubmissionId,
    ) -> impl Future<Output = Result<Option<FormSubmission>, CareOpsError>> + Send {
        let r = self
            .store
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.id == id && f.workspace_id == workspace_id)
            .cloned();
        async { Ok(r) }
    }

    fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Vec<FormSubmission>, CareOpsError>> + Send {
        let r: Vec<_> = self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.workspace_id == workspace_id)
            .cloned()
            .collect();
        async { Ok(r) }
    }

    fn update(
        &self,
        submission: FormSubmission,
    ) -> impl Future<Output = Result<FormSubmission, CareOpsError>> + Send {
        let mut store = self.store.lock().unwrap();
        if let Some(slot) = store.iter_mut().find(|f| f.id == submission.id) {
            *slot = submission.clone();
        }
        async { Ok(submission) }
    }
}

// ── Alerts ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryAlerts {
    pub store: Mutex<Vec<Alert>>,
}

impl InMemoryAlerts {
    pub fn all(&self) -> Vec<Alert> {
        self.store.lock().unwrap().clone()
    }
}

impl AlertRepository for InMemoryAlerts {
    fn create(&self, alert: Alert) -> impl Future<Output = Result<Alert, CareOpsError>> + Send {
        self.store.lock().unwrap().push(alert.clone());
        async { Ok(alert) }
    }

    fn get_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: AlertId,
    ) -> impl Future<Output = Result<Option<Alert>, CareOpsError>> + Send {
        let r = self
            .store
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id && a.workspace_id == workspace_id)
            .cloned();
        async { Ok(r) }
    }

    fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
        status: Option<AlertStatus>,
    ) -> impl Future<Output = Result<Vec<Alert>, CareOpsError>> + Send {
        let r: Vec<_> = self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.workspace_id == workspace_id)
            .filter(|a| status.is_none_or(|s| a.status == s))
            .cloned()
            .collect();
        async { Ok(r) }
    }

    fn update(&self, alert: Alert) -> impl Future<Output = Result<Alert, CareOpsError>> + Send {
        let mut store = self.store.lock().unwrap();
        if let Some(slot) = store.iter_mut().find(|a| a.id == alert.id) {
            *slot = alert.clone();
        }
        async { Ok(alert) }
    }
}

// ── Spies ──────────────────────────────────────────────────────────

/// Records every message; fails for subjects listed in `failing_subjects`.
#[derive(Default)]
pub struct SpyMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub failing_subjects: Vec<String>,
}

impl SpyMailer {
    pub fn failing_on(subject: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_subjects: vec![subject.to_string()],
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl EmailSender for SpyMailer {
    fn send(&self, message: EmailMessage) -> impl Future<Output = Result<(), CareOpsError>> + Send {
        let result = if self.failing_subjects.contains(&message.subject) {
            Err(CareOpsError::Delivery("provider rejected message".into()))
        } else {
            self.sent.lock().unwrap().push(message);
            Ok(())
        };
        async { result }
    }
}

#[derive(Default)]
pub struct SpyBroadcaster {
    pub events: Mutex<Vec<(WorkspaceId, String, serde_json::Value)>>,
}

impl SpyBroadcaster {
    pub fn events(&self) -> Vec<(WorkspaceId, String, serde_json::Value)> {
        self.events.lock().unwrap().clone()
    }
}

impl RealtimeBroadcaster for SpyBroadcaster {
    fn emit_to_workspace(
        &self,
        workspace_id: WorkspaceId,
        event: &str,
        payload: serde_json::Value,
    ) {
        self.events
            .lock()
            .unwrap()
            .push((workspace_id, event.to_string(), payload));
    }
}

#[derive(Default)]
pub struct SpyDispatcher {
    pub calls: Mutex<Vec<(Trigger, EventContext)>>,
}

impl SpyDispatcher {
    pub fn calls(&self) -> Vec<(Trigger, EventContext)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Dispatcher for SpyDispatcher {
    fn dispatch(&self, trigger: Trigger, context: EventContext) -> impl Future<Output = ()> + Send {
        self.calls.lock().unwrap().push((trigger, context));
        async {}
    }
}

/// Let detached dispatches spawned by the code under test run.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
