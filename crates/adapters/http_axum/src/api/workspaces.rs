//! JSON REST handlers for workspaces.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use careops_domain::id::WorkspaceId;
use careops_domain::workspace::Workspace;

use crate::api::parse;
use crate::error::ApiError;
use crate::state::{AppState, Backend};

/// Request body for registering a workspace.
#[derive(Deserialize)]
pub struct RegisterWorkspaceRequest {
    pub business_name: String,
    pub owner_email: Option<String>,
}

/// Possible responses from the register endpoint.
pub enum RegisterResponse {
    Created(Json<Workspace>),
}

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `POST /api/workspaces`: register a workspace and seed its starter rules.
pub async fn register<B: Backend>(
    State(state): State<AppState<B>>,
    Json(req): Json<RegisterWorkspaceRequest>,
) -> Result<RegisterResponse, ApiError> {
    let workspace = state
        .workspace_service
        .register(&req.business_name, req.owner_email)
        .await?;
    Ok(RegisterResponse::Created(Json(workspace)))
}

/// `GET /api/workspaces/{ws}`: get a workspace.
pub async fn get<B: Backend>(
    State(state): State<AppState<B>>,
    Path(ws): Path<String>,
) -> Result<Json<Workspace>, ApiError> {
    let workspace_id: WorkspaceId = parse(&ws)?;
    let workspace = state.workspace_service.get_workspace(workspace_id).await?;
    Ok(Json(workspace))
}
