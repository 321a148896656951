use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use uuid::Uuid;

use crate::features::chat::relay::ChatRelay;

/// Inbound chat events. Frames that fail to parse are ignored.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ChatEvent {
    Join { room_id: String },
    Message { room_id: String },
}

/// HTTP handler that upgrades the connection to WebSocket.
#[utoipa::path(
    get,
    path = "/api/chat/ws",
    tag = "chat",
    responses(
        (status = 101, description = "Switching to WebSocket")
    )
)]
pub async fn chat_ws(ws: WebSocketUpgrade, State(relay): State<Arc<ChatRelay>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, relay))
}

/// Manage a single chat connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Spawns a sender task that forwards relay messages to the sink.
///   2. Processes inbound frames on the current task: joins register the
///      connection in the room, messages are rebroadcast verbatim.
///   3. Drops all room memberships on disconnect.
async fn handle_socket(socket: WebSocket, relay: Arc<ChatRelay>) {
    let conn_id = Uuid::new_v4();
    tracing::info!(conn_id = %conn_id, "Chat connection opened");

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Message>();
    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id;
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "Chat sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(raw)) => {
                let Ok(event) = serde_json::from_str::<ChatEvent>(&raw) else {
                    tracing::debug!(conn_id = %conn_id, "Ignoring unparseable chat frame");
                    continue;
                };

                match event {
                    ChatEvent::Join { room_id } => {
                        tracing::debug!(conn_id = %conn_id, room_id = %room_id, "Joined chat room");
                        relay.join(&room_id, conn_id, tx.clone()).await;
                    }
                    ChatEvent::Message { room_id } => {
                        // The original frame is rebroadcast untouched so
                        // clients see exactly what the sender wrote,
                        // extra fields included.
                        relay
                            .broadcast(&room_id, Message::Text(raw.clone()))
                            .await;
                    }
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "Chat receive error");
                break;
            }
        }
    }

    relay.leave_all(conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "Chat connection closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_event_parses() {
        let event: ChatEvent = serde_json::from_str(r#"{"type":"join","room_id":"abc"}"#).unwrap();
        assert!(matches!(event, ChatEvent::Join { room_id } if room_id == "abc"));
    }

    #[test]
    fn message_event_ignores_extra_fields() {
        let raw = r#"{"type":"message","room_id":"abc","sender":"Asha","text":"hello"}"#;
        let event: ChatEvent = serde_json::from_str(raw).unwrap();
        assert!(matches!(event, ChatEvent::Message { room_id } if room_id == "abc"));
    }

    #[test]
    fn unknown_event_type_fails_to_parse() {
        assert!(serde_json::from_str::<ChatEvent>(r#"{"type":"leave","room_id":"abc"}"#).is_err());
        assert!(serde_json::from_str::<ChatEvent>("not json").is_err());
    }
}
