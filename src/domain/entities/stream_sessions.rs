use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::value_objects::{
    access::{Collaborator, SharedAccess},
    enums::stream_statuses::{ChatMessageType, StreamCategory, StreamEventType, StreamStatus},
};

pub const MAX_CHAT_MESSAGE_CHARS: usize = 500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreamSessionError {
    #[error("Cannot move stream from {from} to {to}")]
    IllegalTransition { from: StreamStatus, to: StreamStatus },
    #[error("Chat is closed while the stream is {0}")]
    ChatClosed(StreamStatus),
    #[error("Chat message cannot be empty")]
    EmptyMessage,
    #[error("Chat message cannot exceed {MAX_CHAT_MESSAGE_CHARS} characters")]
    MessageTooLong,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamEvent {
    pub event_type: StreamEventType,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub message: String,
    pub message_type: ChatMessageType,
    pub is_moderated: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerCount {
    pub count: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamAnalytics {
    pub viewer_counts: Vec<ViewerCount>,
    pub peak_viewers: u64,
    pub total_messages: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSessionEntity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub is_public: bool,
    pub is_recorded: bool,
    pub category: StreamCategory,
    pub tags: Vec<String>,
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing)]
    pub stream_key: String,
    pub status: StreamStatus,
    pub scheduled_start_time: Option<DateTime<Utc>>,
    pub actual_start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Seconds between going live and ending.
    pub duration: i64,
    pub events: Vec<StreamEvent>,
    pub chat: Vec<ChatMessage>,
    pub analytics: StreamAnalytics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StreamSessionEntity {
    pub fn new(owner_id: Uuid, title: String, stream_key: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description: None,
            owner_id,
            is_public: true,
            is_recorded: true,
            category: StreamCategory::default(),
            tags: Vec::new(),
            thumbnail_url: None,
            stream_key,
            status: StreamStatus::Scheduled,
            scheduled_start_time: None,
            actual_start_time: None,
            end_time: None,
            duration: 0,
            events: Vec::new(),
            chat: Vec::new(),
            analytics: StreamAnalytics::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn url(&self) -> String {
        format!("/streams/{}", self.id)
    }

    pub fn transition(
        &mut self,
        to: StreamStatus,
        now: DateTime<Utc>,
    ) -> Result<&StreamEvent, StreamSessionError> {
        let from = self.status;
        if !from.can_transition_to(to) {
            return Err(StreamSessionError::IllegalTransition { from, to });
        }

        let event_type = from.event_for(to);
        match to {
            StreamStatus::Live if self.actual_start_time.is_none() => {
                self.actual_start_time = Some(now);
            }
            StreamStatus::Ended => {
                self.end_time = Some(now);
                if let Some(started) = self.actual_start_time {
                    self.duration = (now - started).num_seconds();
                }
            }
            _ => {}
        }

        let description = match event_type {
            StreamEventType::StreamStart => "Stream started".to_string(),
            StreamEventType::StreamResume => "Stream resumed".to_string(),
            StreamEventType::StreamPause => "Stream paused".to_string(),
            StreamEventType::StreamEnd => "Stream ended".to_string(),
            _ => format!("Stream {}", to),
        };

        self.status = to;
        self.updated_at = now;
        self.events.push(StreamEvent {
            event_type,
            timestamp: now,
            description,
        });
        Ok(&self.events[self.events.len() - 1])
    }

    pub fn add_chat_message(
        &mut self,
        user_id: Uuid,
        username: String,
        message: &str,
        message_type: ChatMessageType,
        now: DateTime<Utc>,
    ) -> Result<&ChatMessage, StreamSessionError> {
        if !self.status.accepts_chat() {
            return Err(StreamSessionError::ChatClosed(self.status));
        }

        let message = message.trim();
        if message.is_empty() {
            return Err(StreamSessionError::EmptyMessage);
        }
        if message.chars().count() > MAX_CHAT_MESSAGE_CHARS {
            return Err(StreamSessionError::MessageTooLong);
        }

        self.chat.push(ChatMessage {
            id: Uuid::new_v4(),
            user_id,
            username,
            message: message.to_string(),
            message_type,
            is_moderated: false,
            timestamp: now,
        });
        self.analytics.total_messages += 1;
        self.updated_at = now;
        Ok(&self.chat[self.chat.len() - 1])
    }

    pub fn update_viewer_count(&mut self, count: u64, now: DateTime<Utc>) {
        self.analytics
            .viewer_counts
            .push(ViewerCount { count, timestamp: now });
        self.analytics.peak_viewers = self.analytics.peak_viewers.max(count);
        self.updated_at = now;
    }
}

impl SharedAccess for StreamSessionEntity {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn collaborators(&self) -> &[Collaborator] {
        &[]
    }

    fn is_public(&self) -> bool {
        self.is_public
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session() -> StreamSessionEntity {
        StreamSessionEntity::new(
            Uuid::new_v4(),
            "Late show".to_string(),
            "key".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn full_lifecycle_logs_events_and_duration() {
        let mut stream = session();
        let start = Utc::now();

        stream.transition(StreamStatus::Live, start).unwrap();
        stream
            .transition(StreamStatus::Paused, start + Duration::seconds(30))
            .unwrap();
        stream
            .transition(StreamStatus::Live, start + Duration::seconds(60))
            .unwrap();
        stream
            .transition(StreamStatus::Ended, start + Duration::seconds(95))
            .unwrap();

        assert_eq!(stream.actual_start_time, Some(start));
        assert_eq!(stream.duration, 95);
        let kinds: Vec<_> = stream.events.iter().map(|e| e.event_type).collect();
        assert_eq!(
            kinds,
            vec![
                StreamEventType::StreamStart,
                StreamEventType::StreamPause,
                StreamEventType::StreamResume,
                StreamEventType::StreamEnd,
            ]
        );
    }

    #[test]
    fn illegal_transition_leaves_state_untouched() {
        let mut stream = session();
        stream.transition(StreamStatus::Cancelled, Utc::now()).unwrap();

        let err = stream.transition(StreamStatus::Live, Utc::now()).unwrap_err();

        assert_eq!(
            err,
            StreamSessionError::IllegalTransition {
                from: StreamStatus::Cancelled,
                to: StreamStatus::Live
            }
        );
        assert_eq!(stream.status, StreamStatus::Cancelled);
        assert_eq!(stream.events.len(), 1);
    }

    #[test]
    fn chat_requires_live_stream_and_bounded_message() {
        let mut stream = session();
        let user = Uuid::new_v4();

        let closed = stream
            .add_chat_message(user, "viewer".into(), "hi", ChatMessageType::Text, Utc::now())
            .unwrap_err();
        assert_eq!(closed, StreamSessionError::ChatClosed(StreamStatus::Scheduled));

        stream.transition(StreamStatus::Live, Utc::now()).unwrap();
        let too_long = "x".repeat(MAX_CHAT_MESSAGE_CHARS + 1);
        assert_eq!(
            stream
                .add_chat_message(user, "viewer".into(), &too_long, ChatMessageType::Text, Utc::now())
                .unwrap_err(),
            StreamSessionError::MessageTooLong
        );
        assert_eq!(
            stream
                .add_chat_message(user, "viewer".into(), "   ", ChatMessageType::Text, Utc::now())
                .unwrap_err(),
            StreamSessionError::EmptyMessage
        );

        let exact = "y".repeat(MAX_CHAT_MESSAGE_CHARS);
        stream
            .add_chat_message(user, "viewer".into(), &exact, ChatMessageType::Text, Utc::now())
            .unwrap();
        assert_eq!(stream.analytics.total_messages, 1);
    }

    #[test]
    fn peak_viewers_only_grows() {
        let mut stream = session();
        stream.update_viewer_count(40, Utc::now());
        stream.update_viewer_count(120, Utc::now());
        stream.update_viewer_count(15, Utc::now());

        assert_eq!(stream.analytics.peak_viewers, 120);
        assert_eq!(stream.analytics.viewer_counts.len(), 3);
    }
}
