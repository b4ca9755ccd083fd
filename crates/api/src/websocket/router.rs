//! Fan-out of client events to every other session
//!
//! Payloads are relayed verbatim. Nothing here validates, stores or moderates
//! what clients send.

use ipchat_shared::SessionId;
use serde_json::Value;

use super::connection::DeliveryReport;
use super::events::RelayKind;
use super::registry::ConnectionRegistry;

/// One inbound event on its way to the other sessions
#[derive(Debug, Clone)]
pub struct RelayEvent {
    pub kind: RelayKind,
    pub payload: Value,
    pub origin: SessionId,
}

impl RelayEvent {
    pub fn new(kind: RelayKind, payload: Value, origin: SessionId) -> Self {
        Self {
            kind,
            payload,
            origin,
        }
    }
}

/// Send `event` to every registered session except the one it came from
///
/// With no other sessions this is a no-op. A closed receiver is logged and
/// skipped without affecting the rest.
pub fn relay(registry: &ConnectionRegistry, event: RelayEvent) -> DeliveryReport {
    let RelayEvent {
        kind,
        payload,
        origin,
    } = event;
    let outbound = kind.outbound(payload);
    let mut report = DeliveryReport::default();

    registry.for_each_other(&origin, |conn| report.record(conn.send(outbound.clone())));

    tracing::debug!(
        origin = %origin,
        event_type = outbound.name(),
        recipients = report.delivered,
        failed = report.failed,
        "Relayed client event"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::websocket::connection::Connection;
    use crate::websocket::events::ServerEvent;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn join(registry: &mut ConnectionRegistry) -> (SessionId, UnboundedReceiver<ServerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = Arc::new(Connection::new(tx));
        let id = conn.session_id;
        registry.add(conn).unwrap();
        (id, rx)
    }

    #[test]
    fn test_message_relayed_to_others_only() {
        let mut registry = ConnectionRegistry::new();
        let (a, mut rx_a) = join(&mut registry);
        let (_b, mut rx_b) = join(&mut registry);
        let (_c, mut rx_c) = join(&mut registry);

        let report = relay(&registry, RelayEvent::new(RelayKind::Chat, json!("hi"), a));

        assert_eq!(report.delivered, 2);
        assert!(rx_a.try_recv().is_err());
        assert_eq!(rx_b.try_recv().unwrap(), ServerEvent::ChatMessage(json!("hi")));
        assert_eq!(rx_c.try_recv().unwrap(), ServerEvent::ChatMessage(json!("hi")));
    }

    #[test]
    fn test_feedback_relayed_as_feedback() {
        let mut registry = ConnectionRegistry::new();
        let (a, _rx_a) = join(&mut registry);
        let (_b, mut rx_b) = join(&mut registry);

        let payload = json!({"feedback": "✍️ amy is typing a message"});
        relay(&registry, RelayEvent::new(RelayKind::Feedback, payload.clone(), a));

        assert_eq!(rx_b.try_recv().unwrap(), ServerEvent::Feedback(payload));
    }

    #[test]
    fn test_relay_without_other_sessions_is_noop() {
        let mut registry = ConnectionRegistry::new();
        let (a, mut rx_a) = join(&mut registry);

        let report = relay(&registry, RelayEvent::new(RelayKind::Chat, json!("alone"), a));

        assert_eq!(report.attempted(), 0);
        assert!(rx_a.try_recv().is_err());
    }

    #[test]
    fn test_closed_receiver_does_not_abort_fanout() {
        let mut registry = ConnectionRegistry::new();
        let (a, _rx_a) = join(&mut registry);
        let (_b, rx_b) = join(&mut registry);
        let (_c, mut rx_c) = join(&mut registry);
        drop(rx_b);

        let report = relay(&registry, RelayEvent::new(RelayKind::Chat, json!(1), a));

        assert_eq!(report.delivered, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(rx_c.try_recv().unwrap(), ServerEvent::ChatMessage(json!(1)));
    }
}
