//! JSON REST handlers for inventory items.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use careops_domain::inventory::InventoryItem;

use crate::api::{existing_workspace, parse};
use crate::error::ApiError;
use crate::state::{AppState, Backend};

/// Request body for creating an item.
#[derive(Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub quantity: i64,
    pub low_stock_threshold: i64,
    pub sku: Option<String>,
    pub unit: Option<String>,
}

/// Request body for setting the on-hand quantity.
#[derive(Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<InventoryItem>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/workspaces/{ws}/inventory`: list items by name.
pub async fn list<B: Backend>(
    State(state): State<AppState<B>>,
    Path(ws): Path<String>,
) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    let items = state.inventory_service.list_items(parse(&ws)?).await?;
    Ok(Json(items))
}

/// `POST /api/workspaces/{ws}/inventory`: add an item.
pub async fn create<B: Backend>(
    State(state): State<AppState<B>>,
    Path(ws): Path<String>,
    Json(req): Json<CreateItemRequest>,
) -> Result<CreateResponse, ApiError> {
    let mut item = InventoryItem::new(
        existing_workspace(&state, &ws).await?,
        req.name,
        req.quantity,
        req.low_stock_threshold,
    )?;
    item.sku = req.sku;
    item.unit = req.unit;
    let created = state.inventory_service.create_item(item).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/workspaces/{ws}/inventory/{id}/quantity`: set the quantity;
/// reaching the threshold runs the `INVENTORY_LOW` automations first.
pub async fn set_quantity<B: Backend>(
    State(state): State<AppState<B>>,
    Path((ws, id)): Path<(String, String)>,
    Json(req): Json<SetQuantityRequest>,
) -> Result<Json<InventoryItem>, ApiError> {
    let item = state
        .inventory_service
        .adjust_quantity(parse(&ws)?, parse(&id)?, req.quantity)
        .await?;
    Ok(Json(item))
}
