pub mod access;
pub mod ai;
pub mod audio_projects;
pub mod auth;
pub mod avatars;
pub mod credit_gate;
pub mod errors;
pub mod scenes;
pub mod streams;
pub mod validation;
pub mod video_projects;
