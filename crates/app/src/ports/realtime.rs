//! Realtime port: push named events to a workspace's connected clients.

use careops_domain::id::WorkspaceId;

/// Emitted after an automation persists a new alert.
pub const ALERT_NEW: &str = "alert:new";
/// Emitted after an alert is acknowledged or resolved.
pub const ALERT_UPDATED: &str = "alert:updated";

/// Fire-and-forget fan-out to every client subscribed to a workspace.
///
/// There is no acknowledgement and emitting never fails.
pub trait RealtimeBroadcaster {
    fn emit_to_workspace(
        &self,
        workspace_id: WorkspaceId,
        event: &str,
        payload: serde_json::Value,
    );
}

impl<T: RealtimeBroadcaster> RealtimeBroadcaster for std::sync::Arc<T> {
    fn emit_to_workspace(
        &self,
        workspace_id: WorkspaceId,
        event: &str,
        payload: serde_json::Value,
    ) {
        (**self).emit_to_workspace(workspace_id, event, payload);
    }
}
