//! JSON REST handlers for contacts.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use careops_domain::contact::{Contact, ContactStatus};

use crate::api::{existing_workspace, parse};
use crate::error::ApiError;
use crate::state::{AppState, Backend};

/// Request body for creating a contact.
#[derive(Deserialize)]
pub struct CreateContactRequest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Request body for changing a contact's status.
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Contact>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/workspaces/{ws}/contacts`: list contacts, newest first.
pub async fn list<B: Backend>(
    State(state): State<AppState<B>>,
    Path(ws): Path<String>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = state.contact_service.list_contacts(parse(&ws)?).await?;
    Ok(Json(contacts))
}

/// `GET /api/workspaces/{ws}/contacts/{id}`: get one contact.
pub async fn get<B: Backend>(
    State(state): State<AppState<B>>,
    Path((ws, id)): Path<(String, String)>,
) -> Result<Json<Contact>, ApiError> {
    let contact = state
        .contact_service
        .get_contact(parse(&ws)?, parse(&id)?)
        .await?;
    Ok(Json(contact))
}

/// `POST /api/workspaces/{ws}/contacts`: create a contact; fires
/// `NEW_CONTACT` in the background.
pub async fn create<B: Backend>(
    State(state): State<AppState<B>>,
    Path(ws): Path<String>,
    Json(req): Json<CreateContactRequest>,
) -> Result<CreateResponse, ApiError> {
    let mut builder = Contact::builder()
        .workspace_id(existing_workspace(&state, &ws).await?)
        .first_name(req.first_name);
    if let Some(last_name) = req.last_name {
        builder = builder.last_name(last_name);
    }
    if let Some(email) = req.email {
        builder = builder.email(email);
    }
    if let Some(phone) = req.phone {
        builder = builder.phone(phone);
    }
    let created = state.contact_service.create_contact(builder.build()?).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/workspaces/{ws}/contacts/{id}/status`: move a contact through
/// the pipeline.
pub async fn update_status<B: Backend>(
    State(state): State<AppState<B>>,
    Path((ws, id)): Path<(String, String)>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Contact>, ApiError> {
    let status: ContactStatus = req.status.parse()?;
    let contact = state
        .contact_service
        .update_status(parse(&ws)?, parse(&id)?, status)
        .await?;
    Ok(Json(contact))
}
