use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::stream_sessions::StreamSessionEntity,
    value_objects::enums::stream_statuses::{ChatMessageType, StreamCategory, StreamStatus},
};

fn public() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStreamRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default = "public")]
    pub is_public: bool,
    #[serde(default = "public")]
    pub is_recorded: bool,
    #[serde(default)]
    pub category: StreamCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    pub scheduled_start_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamTransitionRequest {
    pub status: StreamStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessageRequest {
    pub message: String,
    #[serde(default)]
    pub message_type: ChatMessageType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewerCountRequest {
    pub count: u64,
}

/// Owner-only view that includes the ingest key.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedStreamDto {
    #[serde(flatten)]
    pub stream: StreamSessionEntity,
    pub stream_key: String,
    pub url: String,
}

impl From<StreamSessionEntity> for CreatedStreamDto {
    fn from(stream: StreamSessionEntity) -> Self {
        Self {
            stream_key: stream.stream_key.clone(),
            url: stream.url(),
            stream,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ViewerCountDto {
    pub stream_id: Uuid,
    pub count: u64,
    pub peak_viewers: u64,
}
