pub mod ai_models;
pub mod audio_projects;
pub mod avatars_3d;
pub mod scenes_3d;
pub mod stream_sessions;
pub mod users;
pub mod video_projects;
