//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod alerts;
#[allow(clippy::missing_errors_doc)]
pub mod automations;
#[allow(clippy::missing_errors_doc)]
pub mod bookings;
#[allow(clippy::missing_errors_doc)]
pub mod contacts;
#[allow(clippy::missing_errors_doc)]
pub mod forms;
#[allow(clippy::missing_errors_doc)]
pub mod inventory;
#[allow(clippy::missing_errors_doc)]
pub mod stream;
#[allow(clippy::missing_errors_doc)]
pub mod workspaces;

use std::str::FromStr;

use axum::Router;
use axum::routing::{get, post, put};

use careops_domain::error::ValidationError;
use careops_domain::id::WorkspaceId;

use crate::error::ApiError;
use crate::state::{AppState, Backend};

/// Build the `/api` sub-router.
pub fn routes<B: Backend>() -> Router<AppState<B>> {
    Router::new()
        // Workspaces
        .route("/workspaces", post(workspaces::register::<B>))
        .route("/workspaces/{ws}", get(workspaces::get::<B>))
        .route("/workspaces/{ws}/stream", get(stream::stream::<B>))
        // Automation rules
        .route(
            "/workspaces/{ws}/automations",
            get(automations::list::<B>).post(automations::create::<B>),
        )
        .route(
            "/workspaces/{ws}/automations/{id}",
            get(automations::get::<B>)
                .put(automations::update::<B>)
                .delete(automations::delete::<B>),
        )
        .route(
            "/workspaces/{ws}/automations/{id}/toggle",
            post(automations::toggle::<B>),
        )
        // Contacts
        .route(
            "/workspaces/{ws}/contacts",
            get(contacts::list::<B>).post(contacts::create::<B>),
        )
        .route("/workspaces/{ws}/contacts/{id}", get(contacts::get::<B>))
        .route(
            "/workspaces/{ws}/contacts/{id}/status",
            put(contacts::update_status::<B>),
        )
        // Bookings
        .route(
            "/workspaces/{ws}/bookings",
            get(bookings::list::<B>).post(bookings::create::<B>),
        )
        // Inventory
        .route(
            "/workspaces/{ws}/inventory",
            get(inventory::list::<B>).post(inventory::create::<B>),
        )
        .route(
            "/workspaces/{ws}/inventory/{id}/quantity",
            put(inventory::set_quantity::<B>),
        )
        // Forms
        .route(
            "/workspaces/{ws}/forms",
            get(forms::list::<B>).post(forms::submit::<B>),
        )
        .route(
            "/workspaces/{ws}/forms/{id}/overdue",
            post(forms::mark_overdue::<B>),
        )
        .route(
            "/workspaces/{ws}/forms/{id}/complete",
            post(forms::complete::<B>),
        )
        // Alerts
        .route("/workspaces/{ws}/alerts", get(alerts::list::<B>))
        .route(
            "/workspaces/{ws}/alerts/{id}/acknowledge",
            post(alerts::acknowledge::<B>),
        )
        .route(
            "/workspaces/{ws}/alerts/{id}/resolve",
            post(alerts::resolve::<B>),
        )
}

/// Parse an id or enum taken from the path, query or body.
pub(crate) fn parse<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    T::from_str(raw).map_err(|_| ValidationError::InvalidId(raw.to_string()).into())
}

/// Parse the `{ws}` path segment and resolve it to an existing workspace.
///
/// Writes go through this first so that an unknown workspace surfaces as a
/// `404` rather than a storage failure.
pub(crate) async fn existing_workspace<B: Backend>(
    state: &AppState<B>,
    raw: &str,
) -> Result<WorkspaceId, ApiError> {
    let workspace_id = parse(raw)?;
    state.workspace_service.get_workspace(workspace_id).await?;
    Ok(workspace_id)
}
