pub mod access;
pub mod ai_models;
pub mod audio_projects;
pub mod auth;
pub mod avatars;
pub mod enums;
pub mod geometry;
pub mod scenes;
pub mod streams;
pub mod usage;
pub mod video_projects;
