//! JSON REST handlers for alerts.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use careops_domain::alert::{Alert, AlertStatus};

use crate::api::parse;
use crate::error::ApiError;
use crate::state::{AppState, Backend};

/// Query parameters for the list endpoint.
#[derive(Deserialize)]
pub struct ListQuery {
    /// `ACTIVE`, `ACKNOWLEDGED` or `RESOLVED`.
    pub status: Option<String>,
}

/// `GET /api/workspaces/{ws}/alerts?status=`: list alerts, newest first.
pub async fn list<B: Backend>(
    State(state): State<AppState<B>>,
    Path(ws): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Alert>>, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<AlertStatus>)
        .transpose()?;
    let alerts = state.alert_service.list_alerts(parse(&ws)?, status).await?;
    Ok(Json(alerts))
}

/// `POST /api/workspaces/{ws}/alerts/{id}/acknowledge`.
pub async fn acknowledge<B: Backend>(
    State(state): State<AppState<B>>,
    Path((ws, id)): Path<(String, String)>,
) -> Result<Json<Alert>, ApiError> {
    let alert = state
        .alert_service
        .acknowledge(parse(&ws)?, parse(&id)?)
        .await?;
    Ok(Json(alert))
}

/// `POST /api/workspaces/{ws}/alerts/{id}/resolve`.
pub async fn resolve<B: Backend>(
    State(state): State<AppState<B>>,
    Path((ws, id)): Path<(String, String)>,
) -> Result<Json<Alert>, ApiError> {
    let alert = state
        .alert_service
        .resolve(parse(&ws)?, parse(&id)?)
        .await?;
    Ok(Json(alert))
}
