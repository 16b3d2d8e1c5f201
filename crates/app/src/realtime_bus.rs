//! In-process realtime bus backed by a tokio broadcast channel.

use serde::Serialize;
use tokio::sync::broadcast;

use careops_domain::id::WorkspaceId;
use careops_domain::time::{Timestamp, now};

use crate::ports::RealtimeBroadcaster;

/// One named notification addressed to a workspace.
#[derive(Debug, Clone, Serialize)]
pub struct RealtimeEvent {
    pub workspace_id: WorkspaceId,
    pub event: String,
    pub payload: serde_json::Value,
    pub emitted_at: Timestamp,
}

/// In-process realtime bus using a tokio [`broadcast`] channel.
///
/// Every subscriber sees every workspace's events; consumers filter on
/// [`RealtimeEvent::workspace_id`]. Emitting succeeds even when there are
/// no active subscribers (the event is simply dropped).
pub struct RealtimeBus {
    sender: broadcast::Sender<RealtimeEvent>,
}

impl RealtimeBus {
    /// Create a new bus with the given channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events emitted *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.sender.subscribe()
    }
}

impl RealtimeBroadcaster for RealtimeBus {
    fn emit_to_workspace(
        &self,
        workspace_id: WorkspaceId,
        event: &str,
        payload: serde_json::Value,
    ) {
        let event = RealtimeEvent {
            workspace_id,
            event: event.to_string(),
            payload,
            emitted_at: now(),
        };
        // send only fails when nobody is listening
        if self.sender.send(event).is_err() {
            tracing::trace!(%workspace_id, "realtime event dropped, no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_deliver_event_to_subscriber() {
        let bus = RealtimeBus::new(16);
        let mut rx = bus.subscribe();
        let ws = WorkspaceId::new();

        bus.emit_to_workspace(ws, "alert:new", serde_json::json!({"title": "Low"}));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.workspace_id, ws);
        assert_eq!(received.event, "alert:new");
        assert_eq!(received.payload["title"], "Low");
    }

    #[tokio::test]
    async fn should_deliver_event_to_multiple_subscribers() {
        let bus = RealtimeBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit_to_workspace(WorkspaceId::new(), "alert:updated", serde_json::json!({}));

        assert_eq!(rx1.recv().await.unwrap().event, "alert:updated");
        assert_eq!(rx2.recv().await.unwrap().event, "alert:updated");
    }

    #[test]
    fn should_not_fail_when_no_subscribers() {
        let bus = RealtimeBus::new(16);
        bus.emit_to_workspace(WorkspaceId::new(), "alert:new", serde_json::Value::Null);
    }

    #[tokio::test]
    async fn should_not_deliver_events_emitted_before_subscription() {
        let bus = RealtimeBus::new(16);
        bus.emit_to_workspace(WorkspaceId::new(), "early", serde_json::json!({}));

        let mut rx = bus.subscribe();
        bus.emit_to_workspace(WorkspaceId::new(), "late", serde_json::json!({}));

        assert_eq!(rx.recv().await.unwrap().event, "late");
    }
}
