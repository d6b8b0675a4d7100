//! WebSocket upgrade handler and message dispatch.
//!
//! Each connected client receives:
//! 1. A full [`SessionSnapshot`](crate::snapshot::SessionSnapshot) on connect.
//! 2. Incremental [`WsMessage`] updates as generations start and settle.
//!
//! Clients may send `{"type":"generate", ...}` with the same fields as
//! `POST /api/generate`; the outcome arrives as broadcast messages.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt, stream::SplitSink};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::api::{AppState, GenerateBody};
use crate::broadcast::WsMessage;

/// GET /ws: WebSocket upgrade handler.
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(app): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, app))
}

fn snapshot_message(app: &AppState) -> WsMessage {
    WsMessage::Snapshot {
        data: serde_json::to_value(app.snapshot()).unwrap_or_default(),
    }
}

/// Handle a single WebSocket connection.
async fn handle_socket(socket: WebSocket, app: AppState) {
    let (mut sink, mut stream) = socket.split();

    // Subscribe before the snapshot so no event between the two is lost.
    let mut broadcast_rx = app.broadcast_tx.subscribe();

    if ws_send(&mut sink, &snapshot_message(&app)).await.is_err() {
        return;
    }

    debug!("WebSocket client connected");

    let app_for_forward = app.clone();
    let forward_task = tokio::spawn(async move {
        while let Some(msg) = next_outgoing(&mut broadcast_rx, &app_for_forward).await {
            if ws_send(&mut sink, &msg).await.is_err() {
                break; // Client disconnected.
            }
        }
    });

    while let Some(Ok(msg)) = stream.next().await {
        match msg {
            Message::Text(text) => handle_client_message(&text, &app),
            Message::Close(_) => break,
            _ => {} // Ignore binary, ping, pong.
        }
    }

    debug!("WebSocket client disconnected");
    forward_task.abort();
}

/// The next message to forward to a client, or `None` once the channel
/// closes. A lagged receiver gets a fresh snapshot in place of the
/// messages it missed.
async fn next_outgoing(
    rx: &mut broadcast::Receiver<WsMessage>,
    app: &AppState,
) -> Option<WsMessage> {
    match rx.recv().await {
        Ok(msg) => Some(msg),
        Err(broadcast::error::RecvError::Lagged(n)) => {
            warn!("WebSocket client lagged by {n} messages, resending snapshot");
            Some(snapshot_message(app))
        }
        Err(broadcast::error::RecvError::Closed) => None,
    }
}

/// Process a JSON message received from a client.
fn handle_client_message(text: &str, app: &AppState) {
    #[derive(serde::Deserialize)]
    #[serde(tag = "type", rename_all = "snake_case")]
    enum ClientMessage {
        Generate(GenerateBody),
    }

    let Ok(msg) = serde_json::from_str::<ClientMessage>(text) else {
        debug!("Ignoring malformed WebSocket message");
        return;
    };

    match msg {
        ClientMessage::Generate(body) => {
            let request = match body.into_request() {
                Ok(r) => r,
                Err(e) => {
                    debug!("Ignoring WebSocket generate with bad form values: {e}");
                    return;
                }
            };
            // The cycle outlives this message; results are broadcast.
            let app = app.clone();
            tokio::spawn(async move {
                let _ = app.generate(request).await;
            });
        }
    }
}

/// Serialize a `WsMessage` and send it over the WebSocket sink.
async fn ws_send(sink: &mut SplitSink<WebSocket, Message>, msg: &WsMessage) -> Result<(), ()> {
    let json = serde_json::to_string(msg).unwrap_or_default();
    sink.send(Message::Text(json.into())).await.map_err(|_| ())
}
