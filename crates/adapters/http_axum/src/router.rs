//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::state::{AppState, Backend};

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api`. Includes a [`TraceLayer`] that logs each
/// HTTP request/response at the `DEBUG` level using the `tracing`
/// ecosystem.
pub fn build<B: Backend>(state: AppState<B>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes::<B>())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use careops_app::ports::{
        AlertRepository, AutomationRepository, BookingRepository, ContactRepository, Dispatcher,
        FormRepository, InventoryRepository, WorkspaceRepository,
    };
    use careops_app::realtime_bus::RealtimeBus;
    use careops_app::services::alert_service::AlertService;
    use careops_app::services::automation_service::AutomationService;
    use careops_app::services::booking_service::BookingService;
    use careops_app::services::contact_service::ContactService;
    use careops_app::services::form_service::FormService;
    use careops_app::services::inventory_service::InventoryService;
    use careops_app::services::workspace_service::WorkspaceService;
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

    use super::*;
    use crate::state::Services;

    /// Every workspace exists except this one.
    const UNKNOWN_WORKSPACE: &str = "00000000-0000-4000-8000-000000000000";

    struct StubWorkspaces;
    struct StubRules;
    struct StubContacts;
    struct StubBookings;
    struct StubInventory;
    struct StubForms;
    struct StubAlerts;
    struct StubDispatcher;

    impl WorkspaceRepository for StubWorkspaces {
        async fn create(&self, workspace: Workspace) -> Result<Workspace, CareOpsError> {
            Ok(workspace)
        }
        async fn get_by_id(&self, id: WorkspaceId) -> Result<Option<Workspace>, CareOpsError> {
            if id.to_string() == UNKNOWN_WORKSPACE {
                return Ok(None);
            }
            Ok(Some(Workspace {
                id,
                business_name: "Stub Clinic".to_string(),
                owner_email: None,
                created_at: careops_domain::time::now(),
            }))
        }
    }

    impl AutomationRepository for StubRules {
        async fn create(&self, rule: AutomationRule) -> Result<AutomationRule, CareOpsError> {
            Ok(rule)
        }
        async fn create_many(&self, _rules: Vec<AutomationRule>) -> Result<(), CareOpsError> {
            Ok(())
        }
        async fn get_by_id(
            &self,
            _id: AutomationRuleId,
        ) -> Result<Option<AutomationRule>, CareOpsError> {
            Ok(None)
        }
        async fn list_by_workspace(
            &self,
            _workspace_id: WorkspaceId,
        ) -> Result<Vec<AutomationRule>, CareOpsError> {
            Ok(vec![])
        }
        async fn find_active(
            &self,
            _workspace_id: WorkspaceId,
            _trigger: Trigger,
        ) -> Result<Vec<AutomationRule>, CareOpsError> {
            Ok(vec![])
        }
        async fn update(&self, rule: AutomationRule) -> Result<AutomationRule, CareOpsError> {
            Ok(rule)
        }
        async fn record_execution(
            &self,
            _id: AutomationRuleId,
            _at: Timestamp,
        ) -> Result<(), CareOpsError> {
            Ok(())
        }
        async fn delete(&self, _id: AutomationRuleId) -> Result<(), CareOpsError> {
            Ok(())
        }
    }

    impl ContactRepository for StubContacts {
        async fn create(&self, contact: Contact) -> Result<Contact, CareOpsError> {
            Ok(contact)
        }
        async fn get_by_id(
            &self,
            _workspace_id: WorkspaceId,
            _id: ContactId,
        ) -> Result<Option<Contact>, CareOpsError> {
            Ok(None)
        }
        async fn list_by_workspace(
            &self,
            _workspace_id: WorkspaceId,
        ) -> Result<Vec<Contact>, CareOpsError> {
            Ok(vec![])
        }
        async fn update_status(
            &self,
            _workspace_id: WorkspaceId,
            _id: ContactId,
            _status: ContactStatus,
            _at: Timestamp,
        ) -> Result<Option<Contact>, CareOpsError> {
            Ok(None)
        }
    }

    impl BookingRepository for StubBookings {
        async fn create(&self, booking: Booking) -> Result<Booking, CareOpsError> {
            Ok(booking)
        }
        async fn list_by_workspace(
            &self,
            _workspace_id: WorkspaceId,
        ) -> Result<Vec<Booking>, CareOpsError> {
            Ok(vec![])
        }
    }

    impl InventoryRepository for StubInventory {
        async fn create(&self, item: InventoryItem) -> Result<InventoryItem, CareOpsError> {
            Ok(item)
        }
        async fn get_by_id(
            &self,
            _workspace_id: WorkspaceId,
            _id: InventoryItemId,
        ) -> Result<Option<InventoryItem>, CareOpsError> {
            Ok(None)
        }
        async fn list_by_workspace(
            &self,
            _workspace_id: WorkspaceId,
        ) -> Result<Vec<InventoryItem>, CareOpsError> {
            Ok(vec![])
        }
        async fn update(&self, item: InventoryItem) -> Result<InventoryItem, CareOpsError> {
            Ok(item)
        }
    }

    impl FormRepository for StubForms {
        async fn create(
            &self,
            submission: FormSubmission,
        ) -> Result<FormSubmission, CareOpsError> {
            Ok(submission)
        }
        async fn get_by_id(
            &self,
            _workspace_id: WorkspaceId,
            _id: FormSubmissionId,
        ) -> Result<Option<FormSubmission>, CareOpsError> {
            Ok(None)
        }
        async fn list_by_workspace(
            &self,
            _workspace_id: WorkspaceId,
        ) -> Result<Vec<FormSubmission>, CareOpsError> {
            Ok(vec![])
        }
        async fn update(
            &self,
            submission: FormSubmission,
        ) -> Result<FormSubmission, CareOpsError> {
            Ok(submission)
        }
    }

    impl AlertRepository for StubAlerts {
        async fn create(&self, alert: Alert) -> Result<Alert, CareOpsError> {
            Ok(alert)
        }
        async fn get_by_id(
            &self,
            _workspace_id: WorkspaceId,
            _id: AlertId,
        ) -> Result<Option<Alert>, CareOpsError> {
            Ok(None)
        }
        async fn list_by_workspace(
            &self,
            _workspace_id: WorkspaceId,
            _status: Option<AlertStatus>,
        ) -> Result<Vec<Alert>, CareOpsError> {
            Ok(vec![])
        }
        async fn update(&self, alert: Alert) -> Result<Alert, CareOpsError> {
            Ok(alert)
        }
    }

    impl Dispatcher for StubDispatcher {
        async fn dispatch(&self, _trigger: Trigger, _context: EventContext) {}
    }

    struct Stubs;

    impl Backend for Stubs {
        type Workspaces = StubWorkspaces;
        type Rules = StubRules;
        type Contacts = StubContacts;
        type Bookings = StubBookings;
        type Inventory = StubInventory;
        type Forms = StubForms;
        type Alerts = StubAlerts;
        type Broadcaster = Arc<RealtimeBus>;
        type Dispatcher = StubDispatcher;
    }

    fn test_app() -> Router {
        let realtime = Arc::new(RealtimeBus::new(16));
        let dispatcher = Arc::new(StubDispatcher);
        let services = Services::<Stubs> {
            workspaces: WorkspaceService::new(StubWorkspaces, StubRules),
            automations: AutomationService::new(StubRules),
            contacts: ContactService::new(StubContacts, Arc::clone(&dispatcher)),
            bookings: BookingService::new(StubBookings, StubContacts, Arc::clone(&dispatcher)),
            inventory: InventoryService::new(StubInventory, Arc::clone(&dispatcher)),
            forms: FormService::new(StubForms, StubContacts, Arc::clone(&dispatcher)),
            alerts: AlertService::new(StubAlerts, Arc::clone(&realtime)),
        };
        build(AppState::new(services, realtime))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = test_app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = test_app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_list_rules_of_workspace() {
        let ws = WorkspaceId::new();
        let (status, body) = send(get_request(&format!("/api/workspaces/{ws}/automations"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn should_reject_malformed_workspace_id() {
        let (status, body) = send(get_request("/api/workspaces/not-a-uuid/contacts")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid identifier: not-a-uuid");
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_workspace() {
        let ws = UNKNOWN_WORKSPACE;
        let (status, body) = send(get_request(&format!("/api/workspaces/{ws}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], format!("Workspace {ws} not found"));

        let (status, _) = send(get_request(&format!("/api/workspaces/{ws}/stream"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_create_rule_with_tagged_action() {
        let ws = WorkspaceId::new();
        let body = json!({
            "name": "Welcome Email",
            "trigger": "NEW_CONTACT",
            "action": {
                "type": "SEND_EMAIL",
                "config": {"subject": "Welcome!", "template": "<p>Hi {{firstName}}</p>"}
            }
        });

        let (status, created) = send(json_request(
            "POST",
            &format!("/api/workspaces/{ws}/automations"),
            &body,
        ))
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["workspace_id"], ws.to_string());
        assert_eq!(created["trigger"], "NEW_CONTACT");
        assert_eq!(created["action"]["type"], "SEND_EMAIL");
        assert_eq!(created["is_active"], true);
        assert_eq!(created["execution_count"], 0);
    }

    #[tokio::test]
    async fn should_reject_rule_with_incomplete_action_config() {
        let ws = WorkspaceId::new();
        let body = json!({
            "name": "Broken",
            "trigger": "NEW_CONTACT",
            "action": {"type": "SEND_EMAIL", "config": {"subject": "", "template": "x"}}
        });

        let (status, created) = send(json_request(
            "POST",
            &format!("/api/workspaces/{ws}/automations"),
            &body,
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(created["error"], "field `subject` must not be empty");
    }

    #[tokio::test]
    async fn should_reject_unknown_contact_status() {
        let ws = WorkspaceId::new();
        let id = ContactId::new();
        let (status, body) = send(json_request(
            "PUT",
            &format!("/api/workspaces/{ws}/contacts/{id}/status"),
            &json!({"status": "MAYBE"}),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid status: MAYBE");
    }

    #[tokio::test]
    async fn should_reject_unknown_alert_status_filter() {
        let ws = WorkspaceId::new();
        let (status, _) = send(get_request(&format!(
            "/api/workspaces/{ws}/alerts?status=SNOOZED"
        )))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(get_request(&format!(
            "/api/workspaces/{ws}/alerts?status=ACTIVE"
        )))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn should_return_not_found_when_booking_contact_is_missing() {
        let ws = WorkspaceId::new();
        let (status, _) = send(json_request(
            "POST",
            &format!("/api/workspaces/{ws}/bookings"),
            &json!({
                "contact_id": ContactId::new().to_string(),
                "service_name": "Cleaning",
                "scheduled_at": "2026-03-14T09:30:00Z"
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_not_found_when_writing_to_unknown_workspace() {
        let ws = UNKNOWN_WORKSPACE;
        let writes = [
            (
                format!("/api/workspaces/{ws}/contacts"),
                json!({"first_name": "Jane", "email": "jane@example.com"}),
            ),
            (
                format!("/api/workspaces/{ws}/automations"),
                json!({
                    "name": "Welcome Email",
                    "trigger": "NEW_CONTACT",
                    "action": {
                        "type": "SEND_EMAIL",
                        "config": {"subject": "Welcome!", "template": "Hi"}
                    }
                }),
            ),
            (
                format!("/api/workspaces/{ws}/inventory"),
                json!({"name": "Gloves", "quantity": 10, "low_stock_threshold": 2}),
            ),
            (
                format!("/api/workspaces/{ws}/forms"),
                json!({"form_name": "Intake"}),
            ),
        ];

        for (uri, body) in writes {
            let (status, response) = send(json_request("POST", &uri, &body)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(response["error"], format!("Workspace {ws} not found"), "{uri}");
        }
    }
}
