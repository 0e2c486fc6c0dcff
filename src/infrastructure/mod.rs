pub mod axum_http;
pub mod memory;
pub mod realtime;
pub mod security;
