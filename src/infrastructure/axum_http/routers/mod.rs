pub mod ai;
pub mod audio_projects;
pub mod auth;
pub mod avatars;
pub mod realtime;
pub mod scenes;
pub mod streams;
pub mod video_projects;
