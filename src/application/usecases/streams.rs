use std::sync::Arc;

use chrono::Utc;
use rand::RngCore;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::{
        stream_sessions::{ChatMessage, StreamEvent, StreamSessionEntity},
        users::UserEntity,
    },
    repositories::stream_sessions::StreamSessionRepository,
    value_objects::streams::{
        ChatMessageRequest, CreateStreamRequest, CreatedStreamDto, StreamTransitionRequest,
        ViewerCountDto, ViewerCountRequest,
    },
};

use super::{
    access::{ensure_owner, ensure_view},
    audio_projects::{DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS},
    errors::{UseCaseResult, not_found},
    validation::{optional_text, required_text},
};

const STREAM_KEY_BYTES: usize = 24;
const NOUN: &str = "stream";

fn generate_stream_key() -> String {
    let mut bytes = [0u8; STREAM_KEY_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub struct StreamSessionUseCase<S>
where
    S: StreamSessionRepository + Send + Sync + 'static,
{
    stream_repository: Arc<S>,
}

impl<S> StreamSessionUseCase<S>
where
    S: StreamSessionRepository + Send + Sync + 'static,
{
    pub fn new(stream_repository: Arc<S>) -> Self {
        Self { stream_repository }
    }

    async fn load(&self, stream_id: Uuid) -> UseCaseResult<StreamSessionEntity> {
        self.stream_repository
            .find_by_id(stream_id)
            .await
            .map_err(|err| {
                error!(%stream_id, db_error = ?err, "streams: failed to load stream");
                err
            })?
            .ok_or_else(|| not_found("Stream not found"))
    }

    pub async fn list(&self, user: &UserEntity) -> UseCaseResult<Vec<StreamSessionEntity>> {
        let streams = self.stream_repository.list_visible_to(user.id).await?;
        Ok(streams)
    }

    /// New streams start `scheduled`; the ingest key is only returned here.
    pub async fn create(
        &self,
        user: &UserEntity,
        request: CreateStreamRequest,
    ) -> UseCaseResult<CreatedStreamDto> {
        let mut stream = StreamSessionEntity::new(
            user.id,
            required_text("Title", &request.title, TITLE_MAX_CHARS)?,
            generate_stream_key(),
            Utc::now(),
        );
        stream.description =
            optional_text("Description", request.description, DESCRIPTION_MAX_CHARS)?;
        stream.is_public = request.is_public;
        stream.is_recorded = request.is_recorded;
        stream.category = request.category;
        stream.tags = request.tags;
        stream.scheduled_start_time = request.scheduled_start_time;

        let stream = self.stream_repository.insert(stream).await?;
        info!(user_id = %user.id, stream_id = %stream.id, "streams: stream created");

        Ok(stream.into())
    }

    pub async fn get(&self, user: &UserEntity, stream_id: Uuid) -> UseCaseResult<StreamSessionEntity> {
        let stream = self.load(stream_id).await?;
        ensure_view(&stream, user.id, NOUN)?;
        Ok(stream)
    }

    pub async fn transition(
        &self,
        user: &UserEntity,
        stream_id: Uuid,
        request: StreamTransitionRequest,
    ) -> UseCaseResult<StreamEvent> {
        let mut stream = self.load(stream_id).await?;
        ensure_owner(&stream, user.id, NOUN, "change its status")?;

        let from = stream.status;
        let event = stream
            .transition(request.status, Utc::now())
            .map_err(|err| {
                warn!(%stream_id, %from, to = %request.status, "streams: illegal transition");
                err
            })?
            .clone();
        self.stream_repository.update(stream).await?;
        info!(
            user_id = %user.id,
            %stream_id,
            %from,
            to = %request.status,
            "streams: status changed"
        );

        Ok(event)
    }

    pub async fn post_chat(
        &self,
        user: &UserEntity,
        stream_id: Uuid,
        request: ChatMessageRequest,
    ) -> UseCaseResult<ChatMessage> {
        let mut stream = self.load(stream_id).await?;
        ensure_view(&stream, user.id, NOUN)?;

        let message = stream
            .add_chat_message(
                user.id,
                user.display_name.clone(),
                &request.message,
                request.message_type,
                Utc::now(),
            )?
            .clone();
        self.stream_repository.update(stream).await?;

        Ok(message)
    }

    pub async fn update_viewer_count(
        &self,
        user: &UserEntity,
        stream_id: Uuid,
        request: ViewerCountRequest,
    ) -> UseCaseResult<ViewerCountDto> {
        let mut stream = self.load(stream_id).await?;
        ensure_owner(&stream, user.id, NOUN, "report viewers")?;

        stream.update_viewer_count(request.count, Utc::now());
        let stream = self.stream_repository.update(stream).await?;

        Ok(ViewerCountDto {
            stream_id,
            count: request.count,
            peak_viewers: stream.analytics.peak_viewers,
        })
    }

    pub async fn delete(&self, user: &UserEntity, stream_id: Uuid) -> UseCaseResult<()> {
        let stream = self.load(stream_id).await?;
        ensure_owner(&stream, user.id, NOUN, "delete it")?;

        self.stream_repository.delete(stream_id).await?;
        info!(user_id = %user.id, %stream_id, "streams: stream deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::usecases::errors::UseCaseError,
        domain::{
            repositories::stream_sessions::MockStreamSessionRepository,
            value_objects::enums::stream_statuses::{
                ChatMessageType, StreamCategory, StreamEventType, StreamStatus,
            },
        },
    };
    use mockall::predicate::eq;

    fn user(email: &str) -> UserEntity {
        UserEntity::new(email, "hash".into(), "Streamer".into(), Utc::now())
    }

    fn repository_with(stream: StreamSessionEntity) -> MockStreamSessionRepository {
        let mut repository = MockStreamSessionRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(stream.id))
            .returning(move |_| {
                let stream = stream.clone();
                Box::pin(async move { Ok(Some(stream)) })
            });
        repository
            .expect_update()
            .returning(|stream| Box::pin(async move { Ok(stream) }));
        repository
    }

    fn stream(owner_id: Uuid, status: StreamStatus) -> StreamSessionEntity {
        let mut stream =
            StreamSessionEntity::new(owner_id, "Late show".into(), "key".into(), Utc::now());
        stream.status = status;
        stream
    }

    #[tokio::test]
    async fn created_stream_is_scheduled_with_fresh_key() {
        let mut repository = MockStreamSessionRepository::new();
        repository
            .expect_insert()
            .withf(|stream| stream.status == StreamStatus::Scheduled)
            .returning(|stream| Box::pin(async move { Ok(stream) }));
        let usecase = StreamSessionUseCase::new(Arc::new(repository));

        let created = usecase
            .create(
                &user("owner@example.com"),
                CreateStreamRequest {
                    title: "Launch".into(),
                    description: None,
                    is_public: true,
                    is_recorded: true,
                    category: StreamCategory::Music,
                    tags: Vec::new(),
                    scheduled_start_time: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(created.stream_key.len(), STREAM_KEY_BYTES * 2);
        assert_eq!(created.url, format!("/streams/{}", created.stream.id));
    }

    #[tokio::test]
    async fn illegal_transition_names_both_states() {
        let owner = user("owner@example.com");
        let ended = stream(owner.id, StreamStatus::Ended);
        let stream_id = ended.id;
        let usecase = StreamSessionUseCase::new(Arc::new(repository_with(ended)));

        let err = usecase
            .transition(
                &owner,
                stream_id,
                StreamTransitionRequest {
                    status: StreamStatus::Live,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::BadRequest(_)));
        assert_eq!(err.to_string(), "Cannot move stream from ended to live");
    }

    #[tokio::test]
    async fn only_owner_changes_status() {
        let owner = user("owner@example.com");
        let scheduled = stream(owner.id, StreamStatus::Scheduled);
        let stream_id = scheduled.id;
        let usecase = StreamSessionUseCase::new(Arc::new(repository_with(scheduled)));

        let err = usecase
            .transition(
                &user("viewer@example.com"),
                stream_id,
                StreamTransitionRequest {
                    status: StreamStatus::Live,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UseCaseError::Forbidden(_)));

        let event = usecase
            .transition(
                &owner,
                stream_id,
                StreamTransitionRequest {
                    status: StreamStatus::Live,
                },
            )
            .await
            .unwrap();
        assert_eq!(event.event_type, StreamEventType::StreamStart);
    }

    #[tokio::test]
    async fn chat_is_rejected_before_going_live() {
        let owner = user("owner@example.com");
        let scheduled = stream(owner.id, StreamStatus::Scheduled);
        let stream_id = scheduled.id;
        let usecase = StreamSessionUseCase::new(Arc::new(repository_with(scheduled)));

        let err = usecase
            .post_chat(
                &user("viewer@example.com"),
                stream_id,
                ChatMessageRequest {
                    message: "hello".into(),
                    message_type: ChatMessageType::Text,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::BadRequest(_)));
    }

    #[tokio::test]
    async fn viewer_chat_on_live_stream_carries_display_name() {
        let owner = user("owner@example.com");
        let live = stream(owner.id, StreamStatus::Live);
        let stream_id = live.id;
        let usecase = StreamSessionUseCase::new(Arc::new(repository_with(live)));
        let viewer = UserEntity::new("v@example.com", "hash".into(), "Vic".into(), Utc::now());

        let message = usecase
            .post_chat(
                &viewer,
                stream_id,
                ChatMessageRequest {
                    message: " hi ".into(),
                    message_type: ChatMessageType::Text,
                },
            )
            .await
            .unwrap();

        assert_eq!(message.username, "Vic");
        assert_eq!(message.message, "hi");
    }

    #[tokio::test]
    async fn viewer_count_tracks_peak() {
        let owner = user("owner@example.com");
        let mut live = stream(owner.id, StreamStatus::Live);
        live.update_viewer_count(80, Utc::now());
        let stream_id = live.id;
        let usecase = StreamSessionUseCase::new(Arc::new(repository_with(live)));

        let counted = usecase
            .update_viewer_count(&owner, stream_id, ViewerCountRequest { count: 20 })
            .await
            .unwrap();

        assert_eq!(counted.count, 20);
        assert_eq!(counted.peak_viewers, 80);
    }
}
