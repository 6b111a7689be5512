//! Broadcast notification hub.
//!
//! Implements the domain [`EventSink`] over a `tokio::sync::broadcast`
//! channel. WebSocket sessions subscribe and forward frames to clients.
//! With no subscriber attached, `send` fails and the frame is dropped;
//! the contract is best-effort, so that is silent apart from a debug log.

use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::events::Notification;
use crate::domain::ports::EventSink;

/// Frames the hub fans out: the JSON event envelope, ready to send.
pub type NotificationFrame = String;

const DEFAULT_CAPACITY: usize = 64;

/// Cloneable fan-out point between the lifecycle manager and WebSocket
/// sessions.
#[derive(Clone)]
pub struct BroadcastHub {
    sender: broadcast::Sender<NotificationFrame>,
}

impl BroadcastHub {
    /// Create a hub retaining up to `capacity` undelivered frames per
    /// subscriber before older ones are dropped.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe a new consumer; frames emitted after this call are
    /// delivered to it.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationFrame> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventSink for BroadcastHub {
    fn emit(&self, event: &Notification) {
        let frame = event.envelope().to_string();
        match self.sender.send(frame) {
            Ok(receivers) => {
                debug!(event = event.kind(), receivers, "notification fanned out");
            }
            Err(_) => {
                debug!(event = event.kind(), "no subscribers, notification dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::Unavailable;
    use crate::domain::request::RequestId;
    use crate::domain::user::UserId;
    use rstest::rstest;

    fn sample_event() -> Notification {
        Notification::Unavailable(Unavailable {
            id: RequestId::new(),
            recipient_id: UserId::new(),
            message: "Unfortunately, no blood donors are currently available for your request"
                .to_owned(),
        })
    }

    #[rstest]
    #[actix_rt::test]
    async fn subscribers_receive_the_event_envelope() {
        let hub = BroadcastHub::default();
        let mut receiver = hub.subscribe();

        hub.emit(&sample_event());

        let frame = receiver.recv().await.expect("frame delivered");
        let envelope: serde_json::Value = serde_json::from_str(&frame).expect("valid json");
        assert_eq!(envelope["event"], "request:unavailable");
        assert!(envelope["payload"]["message"].is_string());
    }

    #[rstest]
    fn emit_without_subscribers_is_silent() {
        let hub = BroadcastHub::default();
        // Must not panic or error: delivery is advisory.
        hub.emit(&sample_event());
    }
}
