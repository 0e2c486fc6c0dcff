use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Lifecycle of a stream session.
///
/// ```text
/// Scheduled ──▶ Live ◀──▶ Paused
///     │          │          │
///     ▼          ▼          │
/// Cancelled    Ended ◀──────┘
///                │
///                ▼
///             Archived
/// ```
///
/// Any pair not listed in [`StreamStatus::allowed_targets`] is rejected.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    #[default]
    Scheduled,
    Live,
    Paused,
    Ended,
    Archived,
    Cancelled,
}

impl StreamStatus {
    pub fn allowed_targets(&self) -> &'static [StreamStatus] {
        match self {
            StreamStatus::Scheduled => &[StreamStatus::Live, StreamStatus::Cancelled],
            StreamStatus::Live => &[StreamStatus::Paused, StreamStatus::Ended],
            StreamStatus::Paused => &[StreamStatus::Live, StreamStatus::Ended],
            StreamStatus::Ended => &[StreamStatus::Archived],
            StreamStatus::Archived | StreamStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, target: StreamStatus) -> bool {
        self.allowed_targets().contains(&target)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_targets().is_empty()
    }

    /// Chat is open while the stream is on air, paused included.
    pub fn accepts_chat(&self) -> bool {
        matches!(self, StreamStatus::Live | StreamStatus::Paused)
    }

    /// Event appended to the session log when entering `target` from `self`.
    pub fn event_for(&self, target: StreamStatus) -> StreamEventType {
        match (self, target) {
            (StreamStatus::Paused, StreamStatus::Live) => StreamEventType::StreamResume,
            (_, StreamStatus::Live) => StreamEventType::StreamStart,
            (_, StreamStatus::Paused) => StreamEventType::StreamPause,
            (_, StreamStatus::Ended) => StreamEventType::StreamEnd,
            _ => StreamEventType::Custom,
        }
    }
}

impl Display for StreamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            StreamStatus::Scheduled => "scheduled",
            StreamStatus::Live => "live",
            StreamStatus::Paused => "paused",
            StreamStatus::Ended => "ended",
            StreamStatus::Archived => "archived",
            StreamStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", status)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StreamEventType {
    StreamStart,
    StreamEnd,
    StreamPause,
    StreamResume,
    ViewerJoin,
    ViewerLeave,
    Donation,
    Subscription,
    Milestone,
    TechnicalIssue,
    Custom,
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatMessageType {
    #[default]
    Text,
    Emote,
    Donation,
    Subscription,
    System,
    Moderation,
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StreamCategory {
    Music,
    Gaming,
    Art,
    Talk,
    Education,
    Technology,
    #[default]
    Other,
}
