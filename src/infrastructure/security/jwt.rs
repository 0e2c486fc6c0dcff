use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    application::usecases::auth::SessionTokens,
    config::config_model::Auth,
    domain::{
        entities::users::UserEntity,
        value_objects::{
            auth::{SessionClaims, SessionKind},
            enums::user_roles::UserRole,
        },
    },
};

pub const DEVELOPER_TOKEN_TTL_HOURS: i64 = 24;

/// HS256 session tokens signed with the configured secret.
pub struct JwtSessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    standard_ttl: Duration,
    developer_ttl: Duration,
}

impl JwtSessionTokens {
    pub fn new(secret: &str, expires_in_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            standard_ttl: Duration::days(expires_in_days),
            developer_ttl: Duration::hours(DEVELOPER_TOKEN_TTL_HOURS),
        }
    }

    pub fn from_config(auth: &Auth) -> Self {
        Self::new(&auth.jwt_secret, auth.jwt_expires_in_days)
    }
}

impl SessionTokens for JwtSessionTokens {
    fn issue(&self, user: &UserEntity, kind: SessionKind) -> Result<String> {
        let now = Utc::now();
        let (ttl, is_developer, role) = match kind {
            SessionKind::Standard => (self.standard_ttl, false, None),
            SessionKind::Developer => (self.developer_ttl, true, Some(UserRole::Admin)),
        };

        let claims = SessionClaims {
            sub: user.id.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
            is_developer,
            role,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("failed to sign session token")
    }

    fn verify(&self, token: &str) -> Result<SessionClaims> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .context("session token rejected")?;

        Ok(token_data.claims)
    }
}
