pub mod ai_model_types;
pub mod audio_formats;
pub mod collaborator_roles;
pub mod project_statuses;
pub mod stream_statuses;
pub mod subscription_tiers;
pub mod three_d;
pub mod user_roles;
pub mod video_formats;
