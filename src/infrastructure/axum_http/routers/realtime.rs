use std::sync::Arc;

use axum::{
    Router,
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
};
use tracing::debug;

use crate::infrastructure::realtime::{hub::RoomHub, session::serve_socket};

pub fn routes(hub: Arc<RoomHub>) -> Router {
    Router::new()
        .route("/ws", get(upgrade))
        .with_state(hub)
}

pub async fn upgrade(State(hub): State<Arc<RoomHub>>, ws: WebSocketUpgrade) -> impl IntoResponse {
    debug!("realtime: upgrade requested");
    ws.on_upgrade(move |socket| serve_socket(socket, hub))
}
