use anyhow::{Context, Result};

use super::{
    config_model::{Auth, DotEnvyConfig, Seed, Server},
    stage::Stage,
};

const DEFAULT_PORT: u16 = 8082;
const DEFAULT_BODY_LIMIT_MB: u64 = 50;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_JWT_EXPIRES_IN_DAYS: i64 = 7;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: parse_or("SERVER_PORT", DEFAULT_PORT)?,
        body_limit: parse_or("SERVER_BODY_LIMIT", DEFAULT_BODY_LIMIT_MB)?,
        timeout: parse_or("SERVER_TIMEOUT", DEFAULT_TIMEOUT_SECS)?,
        static_dir: env_string("STATIC_DIR").unwrap_or_else(|| "client".to_string()),
    };

    let auth = Auth {
        jwt_secret: env_string("JWT_SECRET").context("JWT_SECRET is invalid")?,
        jwt_expires_in_days: parse_or("JWT_EXPIRES_IN_DAYS", DEFAULT_JWT_EXPIRES_IN_DAYS)?,
        dev_access_key: env_string("DEV_ACCESS_KEY"),
        owner_email: env_string("OWNER_EMAIL").map(|email| email.to_lowercase()),
    };

    let seed = Seed {
        admin_email: env_string("ADMIN_EMAIL").unwrap_or_else(|| "admin@edaivi.com".to_string()),
        admin_password: env_string("ADMIN_PASSWORD").unwrap_or_else(|| "admin123".to_string()),
    };

    Ok(DotEnvyConfig { server, auth, seed })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(&stage_str).unwrap_or_default()
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env_string(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{} is invalid", key)),
        None => Ok(default),
    }
}
