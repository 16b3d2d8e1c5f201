//! JSON REST handlers for bookings.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use careops_domain::booking::Booking;
use careops_domain::time::Timestamp;

use crate::api::{existing_workspace, parse};
use crate::error::ApiError;
use crate::state::{AppState, Backend};

/// Request body for creating a booking.
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub contact_id: String,
    pub service_name: String,
    /// RFC 3339, e.g. `2026-03-14T09:30:00Z`.
    pub scheduled_at: Timestamp,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Booking>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/workspaces/{ws}/bookings`: list bookings by schedule.
pub async fn list<B: Backend>(
    State(state): State<AppState<B>>,
    Path(ws): Path<String>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let bookings = state.booking_service.list_bookings(parse(&ws)?).await?;
    Ok(Json(bookings))
}

/// `POST /api/workspaces/{ws}/bookings`: create a booking; the response is
/// sent once the `BOOKING_CREATED` automations have run.
pub async fn create<B: Backend>(
    State(state): State<AppState<B>>,
    Path(ws): Path<String>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<CreateResponse, ApiError> {
    let mut builder = Booking::builder()
        .workspace_id(existing_workspace(&state, &ws).await?)
        .contact_id(parse(&req.contact_id)?)
        .service_name(req.service_name)
        .scheduled_at(req.scheduled_at);
    if let Some(minutes) = req.duration_minutes {
        builder = builder.duration_minutes(minutes);
    }
    if let Some(notes) = req.notes {
        builder = builder.notes(notes);
    }
    let created = state.booking_service.create_booking(builder.build()?).await?;
    Ok(CreateResponse::Created(Json(created)))
}
