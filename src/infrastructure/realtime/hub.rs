use std::collections::HashMap;

use tokio::sync::{RwLock, broadcast};
use tracing::debug;

use super::events::RoomEnvelope;

pub const DEFAULT_ROOM_CAPACITY: usize = 256;

/// Named rooms, each backed by one broadcast channel.
pub struct RoomHub {
    rooms: RwLock<HashMap<String, broadcast::Sender<RoomEnvelope>>>,
    capacity: usize,
}

impl Default for RoomHub {
    fn default() -> Self {
        Self::new(DEFAULT_ROOM_CAPACITY)
    }
}

impl RoomHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    pub async fn join(&self, room_id: &str) -> broadcast::Receiver<RoomEnvelope> {
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(room_id.to_string())
            .or_insert_with(|| {
                debug!(room_id, "realtime: room opened");
                broadcast::channel(self.capacity).0
            })
            .subscribe()
    }

    /// Closes the room once nobody is subscribed.
    pub async fn leave(&self, room_id: &str) {
        let mut rooms = self.rooms.write().await;
        if rooms
            .get(room_id)
            .is_some_and(|sender| sender.receiver_count() == 0)
        {
            rooms.remove(room_id);
            debug!(room_id, "realtime: room closed");
        }
    }

    /// Returns how many subscribers received the envelope, the sender's own subscription included.
    pub async fn publish(&self, room_id: &str, envelope: RoomEnvelope) -> usize {
        let rooms = self.rooms.read().await;
        match rooms.get(room_id) {
            Some(sender) => sender.send(envelope).unwrap_or(0),
            None => 0,
        }
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}
