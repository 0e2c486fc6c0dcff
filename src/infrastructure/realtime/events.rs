use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Frames a client sends over `/ws`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinRoom { room_id: String, user_id: String },
    LeaveRoom { room_id: String, user_id: String },
    ChatMessage { room_id: String, message: Value },
    ProjectUpdate { room_id: String, update: Value },
    StreamEvent { stream_id: String, event: Value },
}

/// Frames relayed to the other members of a room.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    UserConnected { room_id: String, user_id: String },
    UserDisconnected { room_id: String, user_id: String },
    ChatMessage { room_id: String, message: Value },
    ProjectUpdate { room_id: String, update: Value },
    StreamEvent { stream_id: String, event: Value },
}

#[derive(Debug, Clone)]
pub struct RoomEnvelope {
    pub sender: Uuid,
    pub event: ServerEvent,
}

impl ClientEvent {
    /// Room the resulting event is relayed to, and the event itself.
    pub fn into_relay(self) -> (String, ServerEvent) {
        match self {
            ClientEvent::JoinRoom { room_id, user_id } => (
                room_id.clone(),
                ServerEvent::UserConnected { room_id, user_id },
            ),
            ClientEvent::LeaveRoom { room_id, user_id } => (
                room_id.clone(),
                ServerEvent::UserDisconnected { room_id, user_id },
            ),
            ClientEvent::ChatMessage { room_id, message } => (
                room_id.clone(),
                ServerEvent::ChatMessage { room_id, message },
            ),
            ClientEvent::ProjectUpdate { room_id, update } => (
                room_id.clone(),
                ServerEvent::ProjectUpdate { room_id, update },
            ),
            ClientEvent::StreamEvent { stream_id, event } => (
                stream_id.clone(),
                ServerEvent::StreamEvent { stream_id, event },
            ),
        }
    }
}
