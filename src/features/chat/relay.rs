use std::collections::HashMap;

use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// Channel sender half for pushing messages to a WebSocket connection.
pub type ChatSender = mpsc::UnboundedSender<Message>;

/// In-memory chat room table.
///
/// Rooms are keyed by a client-supplied id (by convention the report id,
/// never validated) and hold one sender per joined connection. Nothing is
/// persisted; membership lives exactly as long as the connection.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct ChatRelay {
    rooms: RwLock<HashMap<String, HashMap<Uuid, ChatSender>>>,
}

impl ChatRelay {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Join a connection to a room, creating the room on first join. A
    /// connection may be in several rooms at once.
    pub async fn join(&self, room_id: &str, conn_id: Uuid, sender: ChatSender) {
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(room_id.to_string())
            .or_default()
            .insert(conn_id, sender);
    }

    /// Remove a connection from every room it joined, dropping rooms
    /// that become empty.
    pub async fn leave_all(&self, conn_id: Uuid) {
        let mut rooms = self.rooms.write().await;
        rooms.retain(|_, members| {
            members.remove(&conn_id);
            !members.is_empty()
        });
    }

    /// Rebroadcast a frame to every member of a room, including the
    /// sender if joined. Closed channels are silently skipped; those
    /// connections clean themselves up on disconnect.
    pub async fn broadcast(&self, room_id: &str, message: Message) {
        let rooms = self.rooms.read().await;
        if let Some(members) = rooms.get(room_id) {
            for sender in members.values() {
                let _ = sender.send(message.clone());
            }
        }
    }

    #[cfg(test)]
    pub async fn room_size(&self, room_id: &str) -> usize {
        self.rooms
            .read()
            .await
            .get(room_id)
            .map_or(0, |members| members.len())
    }
}

impl Default for ChatRelay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Message {
        Message::Text(s.to_string().into())
    }

    #[tokio::test]
    async fn broadcast_reaches_all_room_members() {
        let relay = ChatRelay::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();

        relay.join("room-1", Uuid::new_v4(), tx_a).await;
        relay.join("room-1", Uuid::new_v4(), tx_b).await;

        relay.broadcast("room-1", text("hello")).await;

        assert_eq!(rx_a.recv().await.unwrap(), text("hello"));
        assert_eq!(rx_b.recv().await.unwrap(), text("hello"));
    }

    #[tokio::test]
    async fn broadcast_does_not_cross_rooms() {
        let relay = ChatRelay::new();
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();

        relay.join("room-1", Uuid::new_v4(), tx_a).await;
        relay.join("room-2", Uuid::new_v4(), tx_b).await;

        relay.broadcast("room-1", text("hello")).await;

        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn leave_all_removes_membership_everywhere() {
        let relay = ChatRelay::new();
        let conn = Uuid::new_v4();
        let (tx, mut rx) = mpsc::unbounded_channel();

        relay.join("room-1", conn, tx.clone()).await;
        relay.join("room-2", conn, tx).await;
        relay.leave_all(conn).await;

        assert_eq!(relay.room_size("room-1").await, 0);
        assert_eq!(relay.room_size("room-2").await, 0);

        relay.broadcast("room-1", text("after leave")).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn broadcast_to_unknown_room_is_a_noop() {
        let relay = ChatRelay::new();
        relay.broadcast("nowhere", text("into the void")).await;
    }

    #[tokio::test]
    async fn closed_channels_are_skipped() {
        let relay = ChatRelay::new();
        let (tx_dead, rx_dead) = mpsc::unbounded_channel();
        drop(rx_dead);
        let (tx_live, mut rx_live) = mpsc::unbounded_channel();

        relay.join("room-1", Uuid::new_v4(), tx_dead).await;
        relay.join("room-1", Uuid::new_v4(), tx_live).await;

        relay.broadcast("room-1", text("still works")).await;
        assert_eq!(rx_live.recv().await.unwrap(), text("still works"));
    }
}
