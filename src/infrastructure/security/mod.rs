pub mod jwt;
pub mod one_time_tokens;
pub mod passwords;
