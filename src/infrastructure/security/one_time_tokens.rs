use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const EMAIL_VERIFICATION_TTL_HOURS: i64 = 24;
pub const PASSWORD_RESET_TTL_HOURS: i64 = 1;

/// Raw token for the user plus the digest that gets stored.
#[derive(Debug, Clone)]
pub struct OneTimeToken {
    pub raw: String,
    pub digest: String,
    pub expires_at: DateTime<Utc>,
}

impl OneTimeToken {
    pub fn generate(ttl_hours: i64, now: DateTime<Utc>) -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let raw = hex::encode(bytes);

        Self {
            digest: digest(&raw),
            raw,
            expires_at: now + Duration::hours(ttl_hours),
        }
    }
}

/// Hex sha256 of a raw token, as kept in storage.
pub fn digest(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}
