//! [`SessionObserver`] that converts session events into WebSocket messages.
//!
//! [`WebBroadcastObserver`] serializes each [`SessionEvent`] into a
//! [`WsMessage`] and broadcasts it to every connected client, so all open
//! tabs see the loading state and the result of a generation.

use postcraft::events::{SessionEvent, SessionObserver};
use postcraft::request::PostRequest;
use postcraft::segment::segment;
use serde::Serialize;
use tokio::sync::broadcast;

/// A message sent from the server to WebSocket clients.
///
/// Discriminated on the `type` field when serialized to JSON.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// Full session snapshot (sent on connect and after a client lags).
    Snapshot { data: serde_json::Value },
    /// A generation started; clients clear the result and disable submit.
    Started { request: PostRequest },
    /// A generation settled.
    Finished {
        result: String,
        blocks: Vec<String>,
        failed: bool,
    },
    /// A submission was rejected by validation.
    Notice { notice: String },
}

/// Broadcasts session events to WebSocket clients.
///
/// Compose alongside [`LoggingObserver`](postcraft::events::LoggingObserver)
/// in a [`CompositeObserver`](postcraft::events::CompositeObserver).
pub struct WebBroadcastObserver {
    sender: broadcast::Sender<WsMessage>,
}

impl WebBroadcastObserver {
    pub fn new(sender: broadcast::Sender<WsMessage>) -> Self {
        Self { sender }
    }

    /// Silently ignores send errors (no subscribers is fine).
    fn broadcast(&self, msg: WsMessage) {
        let _ = self.sender.send(msg);
    }
}

impl SessionObserver for WebBroadcastObserver {
    fn on_event(&self, event: &SessionEvent<'_>) {
        match event {
            SessionEvent::Notice(notice) => self.broadcast(WsMessage::Notice {
                notice: notice.to_string(),
            }),
            SessionEvent::Started { request } => self.broadcast(WsMessage::Started {
                request: (*request).clone(),
            }),
            SessionEvent::Finished { result, failed } => self.broadcast(WsMessage::Finished {
                result: result.to_string(),
                blocks: segment(result).iter().map(ToString::to_string).collect(),
                failed: *failed,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postcraft::platform::Platform;

    #[test]
    fn ws_message_serializes_with_type_tag() {
        let msg = WsMessage::Notice {
            notice: "fill the form".into(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "notice");
        assert_eq!(json["notice"], "fill the form");
    }

    #[test]
    fn finished_event_carries_rendered_blocks() {
        let (sender, mut rx) = broadcast::channel(4);
        let observer = WebBroadcastObserver::new(sender);

        observer.on_event(&SessionEvent::Finished {
            result: "Platform: Twitter\nPost: hi\nPlatform: Linkedin\nPost: hello",
            failed: false,
        });

        let json = serde_json::to_value(rx.try_recv().unwrap()).unwrap();
        assert_eq!(json["type"], "finished");
        assert_eq!(json["failed"], false);
        assert_eq!(
            json["blocks"],
            serde_json::json!(["Platform: Twitter\nPost: hi", "Platform: Linkedin\nPost: hello"])
        );
    }

    #[test]
    fn started_event_carries_request() {
        let (sender, mut rx) = broadcast::channel(4);
        let observer = WebBroadcastObserver::new(sender);
        let request = PostRequest::new("hi", [Platform::Instagram], None);

        observer.on_event(&SessionEvent::Started { request: &request });

        let json = serde_json::to_value(rx.try_recv().unwrap()).unwrap();
        assert_eq!(json["type"], "started");
        assert_eq!(json["request"]["platforms"], serde_json::json!(["Instagram"]));
        assert!(json["request"]["tone"].is_null());
    }

    #[test]
    fn broadcast_without_subscribers_is_ignored() {
        let (sender, rx) = broadcast::channel(4);
        drop(rx);
        WebBroadcastObserver::new(sender).on_event(&SessionEvent::Notice("x"));
    }
}
