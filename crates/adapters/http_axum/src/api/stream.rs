//! Server-Sent Events (SSE) stream for realtime workspace notifications.

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::{Stream, StreamExt};

use crate::api::existing_workspace;
use crate::error::ApiError;
use crate::state::{AppState, Backend};

/// `GET /api/workspaces/{ws}/stream`: SSE stream of the workspace's
/// realtime events.
///
/// Each frame carries the event name (`alert:new`, `alert:updated`) in the
/// SSE `event:` field and the JSON-encoded event in `data:`. Events of
/// other workspaces are filtered out.
pub async fn stream<B: Backend>(
    State(state): State<AppState<B>>,
    Path(ws): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let workspace_id = existing_workspace(&state, &ws).await?;

    let events = BroadcastStream::new(state.realtime.subscribe()).filter_map(move |result| {
        match result {
            Ok(event) if event.workspace_id == workspace_id => {
                match serde_json::to_string(&event) {
                    Ok(json) => Some(Ok(Event::default().event(&event.event).data(json))),
                    Err(err) => {
                        tracing::warn!(%err, "failed to serialize realtime event for SSE stream");
                        None
                    }
                }
            }
            Ok(_) => None,
            Err(BroadcastStreamRecvError::Lagged(n)) => {
                tracing::warn!(skipped = n, "SSE subscriber lagged, some events were dropped");
                None
            }
        }
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
