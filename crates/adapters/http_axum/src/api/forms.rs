//! JSON REST handlers for form submissions.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use careops_domain::form::FormSubmission;
use careops_domain::id::ContactId;
use careops_domain::time::Timestamp;

use crate::api::{existing_workspace, parse};
use crate::error::ApiError;
use crate::state::{AppState, Backend};

/// Request body for submitting a form.
#[derive(Deserialize)]
pub struct SubmitFormRequest {
    pub form_name: String,
    pub contact_id: Option<String>,
    pub due_at: Option<Timestamp>,
}

/// Possible responses from the submit endpoint.
pub enum SubmitResponse {
    Created(Json<FormSubmission>),
}

impl IntoResponse for SubmitResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/workspaces/{ws}/forms`: list submissions, newest first.
pub async fn list<B: Backend>(
    State(state): State<AppState<B>>,
    Path(ws): Path<String>,
) -> Result<Json<Vec<FormSubmission>>, ApiError> {
    let submissions = state.form_service.list_submissions(parse(&ws)?).await?;
    Ok(Json(submissions))
}

/// `POST /api/workspaces/{ws}/forms`: record a pending submission.
pub async fn submit<B: Backend>(
    State(state): State<AppState<B>>,
    Path(ws): Path<String>,
    Json(req): Json<SubmitFormRequest>,
) -> Result<SubmitResponse, ApiError> {
    let contact_id = req
        .contact_id
        .as_deref()
        .map(parse::<ContactId>)
        .transpose()?;
    let workspace_id = existing_workspace(&state, &ws).await?;
    let submission = FormSubmission::pending(workspace_id, contact_id, req.form_name, req.due_at)?;
    let created = state.form_service.submit_form(submission).await?;
    Ok(SubmitResponse::Created(Json(created)))
}

/// `POST /api/workspaces/{ws}/forms/{id}/overdue`: mark a pending
/// submission overdue.
pub async fn mark_overdue<B: Backend>(
    State(state): State<AppState<B>>,
    Path((ws, id)): Path<(String, String)>,
) -> Result<Json<FormSubmission>, ApiError> {
    let submission = state
        .form_service
        .mark_overdue(parse(&ws)?, parse(&id)?)
        .await?;
    Ok(Json(submission))
}

/// `POST /api/workspaces/{ws}/forms/{id}/complete`: mark completed.
pub async fn complete<B: Backend>(
    State(state): State<AppState<B>>,
    Path((ws, id)): Path<(String, String)>,
) -> Result<Json<FormSubmission>, ApiError> {
    let submission = state
        .form_service
        .complete(parse(&ws)?, parse(&id)?)
        .await?;
    Ok(Json(submission))
}
