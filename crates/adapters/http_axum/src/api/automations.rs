//! JSON REST handlers for automation rules.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use careops_domain::automation::{Action, AutomationRule, Conditions, Trigger};
use careops_domain::id::{AutomationRuleId, WorkspaceId};

use crate::api::{existing_workspace, parse};
use crate::error::ApiError;
use crate::state::{AppState, Backend};

/// Request body for creating or replacing a rule.
#[derive(Deserialize)]
pub struct RuleRequest {
    pub name: String,
    pub description: Option<String>,
    pub trigger: Trigger,
    /// Tagged as `{"type": "SEND_EMAIL", "config": {…}}`.
    pub action: Action,
    #[serde(default)]
    pub conditions: Conditions,
    pub is_active: Option<bool>,
}

impl RuleRequest {
    fn into_rule(
        self,
        workspace_id: WorkspaceId,
        id: Option<AutomationRuleId>,
    ) -> Result<AutomationRule, ApiError> {
        let mut builder = AutomationRule::builder()
            .workspace_id(workspace_id)
            .name(self.name)
            .trigger(self.trigger)
            .action(self.action)
            .conditions(self.conditions)
            .active(self.is_active.unwrap_or(true));
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        if let Some(id) = id {
            builder = builder.id(id);
        }
        Ok(builder.build()?)
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<AutomationRule>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/workspaces/{ws}/automations`: list a workspace's rules.
pub async fn list<B: Backend>(
    State(state): State<AppState<B>>,
    Path(ws): Path<String>,
) -> Result<Json<Vec<AutomationRule>>, ApiError> {
    let rules = state.automation_service.list_rules(parse(&ws)?).await?;
    Ok(Json(rules))
}

/// `GET /api/workspaces/{ws}/automations/{id}`: get one rule.
pub async fn get<B: Backend>(
    State(state): State<AppState<B>>,
    Path((ws, id)): Path<(String, String)>,
) -> Result<Json<AutomationRule>, ApiError> {
    let rule = state
        .automation_service
        .get_rule(parse(&ws)?, parse(&id)?)
        .await?;
    Ok(Json(rule))
}

/// `POST /api/workspaces/{ws}/automations`: create a rule.
pub async fn create<B: Backend>(
    State(state): State<AppState<B>>,
    Path(ws): Path<String>,
    Json(req): Json<RuleRequest>,
) -> Result<CreateResponse, ApiError> {
    let workspace_id = existing_workspace(&state, &ws).await?;
    let rule = req.into_rule(workspace_id, None)?;
    let created = state.automation_service.create_rule(rule).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/workspaces/{ws}/automations/{id}`: replace a rule's
/// definition, keeping its execution history.
pub async fn update<B: Backend>(
    State(state): State<AppState<B>>,
    Path((ws, id)): Path<(String, String)>,
    Json(req): Json<RuleRequest>,
) -> Result<Json<AutomationRule>, ApiError> {
    let workspace_id: WorkspaceId = parse(&ws)?;
    let rule = req.into_rule(workspace_id, Some(parse(&id)?))?;
    let updated = state
        .automation_service
        .update_rule(workspace_id, rule)
        .await?;
    Ok(Json(updated))
}

/// `POST /api/workspaces/{ws}/automations/{id}/toggle`: flip `is_active`.
pub async fn toggle<B: Backend>(
    State(state): State<AppState<B>>,
    Path((ws, id)): Path<(String, String)>,
) -> Result<Json<AutomationRule>, ApiError> {
    let rule = state
        .automation_service
        .toggle_rule(parse(&ws)?, parse(&id)?)
        .await?;
    Ok(Json(rule))
}

/// `DELETE /api/workspaces/{ws}/automations/{id}`: delete a rule.
pub async fn delete<B: Backend>(
    State(state): State<AppState<B>>,
    Path((ws, id)): Path<(String, String)>,
) -> Result<DeleteResponse, ApiError> {
    state
        .automation_service
        .delete_rule(parse(&ws)?, parse(&id)?)
        .await?;
    Ok(DeleteResponse::NoContent)
}
