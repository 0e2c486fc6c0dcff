use crate::domain::entities::{
    ai_models::AiModelEntity, audio_projects::AudioProjectEntity, avatars_3d::Avatar3DEntity,
    scenes_3d::Scene3DEntity, stream_sessions::StreamSessionEntity, users::UserEntity,
    video_projects::VideoProjectEntity,
};

use super::store::MemoryStore;

/// One store per aggregate, shared by every repository handle.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    pub users: MemoryStore<UserEntity>,
    pub ai_models: MemoryStore<AiModelEntity>,
    pub audio_projects: MemoryStore<AudioProjectEntity>,
    pub video_projects: MemoryStore<VideoProjectEntity>,
    pub scenes: MemoryStore<Scene3DEntity>,
    pub avatars: MemoryStore<Avatar3DEntity>,
    pub streams: MemoryStore<StreamSessionEntity>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}
