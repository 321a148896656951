use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::chat::handler;
use crate::features::chat::relay::ChatRelay;

/// Create routes for the chat relay
///
/// Note: This feature is public (no authentication required)
pub fn routes(relay: Arc<ChatRelay>) -> Router {
    Router::new()
        .route("/api/chat/ws", get(handler::chat_ws))
        .with_state(relay)
}
