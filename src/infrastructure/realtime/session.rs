use std::{collections::HashMap, sync::Arc};

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::{
    sync::{broadcast::error::RecvError, mpsc},
    task::JoinHandle,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    events::{ClientEvent, RoomEnvelope, ServerEvent},
    hub::RoomHub,
};

const OUTBOUND_CAPACITY: usize = 64;

struct Membership {
    user_id: String,
    forwarder: JoinHandle<()>,
}

/// Room memberships of one connection. Frames it publishes are never echoed back to it.
pub struct RoomSession {
    connection_id: Uuid,
    hub: Arc<RoomHub>,
    outbound: mpsc::Sender<ServerEvent>,
    memberships: HashMap<String, Membership>,
}

impl RoomSession {
    pub fn new(hub: Arc<RoomHub>, outbound: mpsc::Sender<ServerEvent>) -> Self {
        Self {
            connection_id: Uuid::new_v4(),
            hub,
            outbound,
            memberships: HashMap::new(),
        }
    }

    pub fn connection_id(&self) -> Uuid {
        self.connection_id
    }

    pub fn rooms(&self) -> impl Iterator<Item = &str> {
        self.memberships.keys().map(String::as_str)
    }

    pub async fn handle_text(&mut self, text: &str) {
        match serde_json::from_str::<ClientEvent>(text) {
            Ok(event) => self.handle(event).await,
            Err(err) => {
                warn!(connection_id = %self.connection_id, error = %err, "realtime: malformed frame ignored");
            }
        }
    }

    pub async fn handle(&mut self, event: ClientEvent) {
        match &event {
            ClientEvent::JoinRoom { room_id, user_id } => {
                self.subscribe(room_id, user_id).await;
                info!(connection_id = %self.connection_id, %room_id, %user_id, "realtime: joined room");
            }
            ClientEvent::LeaveRoom { room_id, user_id } => {
                info!(connection_id = %self.connection_id, %room_id, %user_id, "realtime: left room");
            }
            _ => {}
        }

        let leaving = match &event {
            ClientEvent::LeaveRoom { room_id, .. } => Some(room_id.clone()),
            _ => None,
        };

        let (room_id, relayed) = event.into_relay();
        self.relay(&room_id, relayed).await;

        if let Some(room_id) = leaving {
            self.unsubscribe(&room_id).await;
        }
    }

    /// Leaves every room, telling the others this user disconnected.
    pub async fn close(mut self) {
        let rooms: Vec<String> = self.memberships.keys().cloned().collect();
        for room_id in rooms {
            if let Some(user_id) = self.memberships.get(&room_id).map(|m| m.user_id.clone()) {
                self.relay(
                    &room_id,
                    ServerEvent::UserDisconnected {
                        room_id: room_id.clone(),
                        user_id,
                    },
                )
                .await;
            }
            self.unsubscribe(&room_id).await;
        }
        debug!(connection_id = %self.connection_id, "realtime: session closed");
    }

    async fn relay(&self, room_id: &str, event: ServerEvent) {
        let delivered = self
            .hub
            .publish(
                room_id,
                RoomEnvelope {
                    sender: self.connection_id,
                    event,
                },
            )
            .await;
        debug!(connection_id = %self.connection_id, room_id, delivered, "realtime: relayed");
    }

    async fn subscribe(&mut self, room_id: &str, user_id: &str) {
        if let Some(membership) = self.memberships.get_mut(room_id) {
            membership.user_id = user_id.to_string();
            return;
        }

        let mut receiver = self.hub.join(room_id).await;
        let outbound = self.outbound.clone();
        let connection_id = self.connection_id;
        let room = room_id.to_string();

        let forwarder = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(envelope) if envelope.sender == connection_id => continue,
                    Ok(envelope) => {
                        if outbound.send(envelope.event).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(%connection_id, room_id = %room, skipped, "realtime: slow consumer dropped events");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        self.memberships.insert(
            room_id.to_string(),
            Membership {
                user_id: user_id.to_string(),
                forwarder,
            },
        );
    }

    async fn unsubscribe(&mut self, room_id: &str) {
        let Some(membership) = self.memberships.remove(room_id) else {
            return;
        };
        membership.forwarder.abort();
        // The receiver is only dropped once the aborted task has been reaped.
        let _ = membership.forwarder.await;
        self.hub.leave(room_id).await;
    }
}

/// Drives one upgraded `/ws` connection until the peer goes away.
pub async fn serve_socket(socket: WebSocket, hub: Arc<RoomHub>) {
    let (mut sink, mut stream) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<ServerEvent>(OUTBOUND_CAPACITY);
    let mut session = RoomSession::new(hub, outbound_tx);
    let connection_id = session.connection_id();
    info!(%connection_id, "realtime: socket connected");

    let writer = tokio::spawn(async move {
        while let Some(event) = outbound_rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(err) => {
                    warn!(%connection_id, error = %err, "realtime: failed to encode event");
                    continue;
                }
            };
            if sink.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => session.handle_text(&text).await,
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(err) => {
                debug!(%connection_id, error = %err, "realtime: socket read failed");
                break;
            }
        }
    }

    session.close().await;
    writer.abort();
    info!(%connection_id, "realtime: socket disconnected");
}
