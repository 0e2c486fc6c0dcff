use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::users::{UserEntity, normalize_email},
        repositories::users::{CreditDebit, UserRepository},
    },
    infrastructure::memory::memory_database::MemoryDatabase,
};

pub struct UserMemory {
    db: Arc<MemoryDatabase>,
}

impl UserMemory {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserMemory {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>> {
        Ok(self.db.users.get(&user_id).await)
    }

    async fn find_by_email(&self, email: String) -> Result<Option<UserEntity>> {
        let email = normalize_email(&email);
        Ok(self.db.users.find(|user| user.email == email).await)
    }

    async fn find_by_verification_token(&self, token_hash: String) -> Result<Option<UserEntity>> {
        Ok(self
            .db
            .users
            .find(|user| user.verification_token.as_deref() == Some(token_hash.as_str()))
            .await)
    }

    async fn find_by_reset_token(&self, token_hash: String) -> Result<Option<UserEntity>> {
        Ok(self
            .db
            .users
            .find(|user| user.reset_password_token.as_deref() == Some(token_hash.as_str()))
            .await)
    }

    async fn insert(&self, user: UserEntity) -> Result<UserEntity> {
        let email = normalize_email(&user.email);
        let inserted = self
            .db
            .users
            .insert_unique(user.id, user.clone(), |existing| existing.email == email)
            .await;
        if !inserted {
            bail!("email {} is already registered", user.email);
        }
        Ok(user)
    }

    async fn update(&self, user: UserEntity) -> Result<UserEntity> {
        if !self.db.users.replace(&user.id, user.clone()).await {
            bail!("user {} not found", user.id);
        }
        Ok(user)
    }

    async fn debit_credits(&self, user_id: Uuid, amount: i64) -> Result<CreditDebit> {
        let outcome = self
            .db
            .users
            .try_update(&user_id, |user| {
                if user.usage.ai_credits < amount {
                    return Err(user.usage.ai_credits);
                }
                user.usage.ai_credits -= amount;
                user.updated_at = Utc::now();
                Ok(user.usage.ai_credits)
            })
            .await;

        match outcome {
            Some(Ok(remaining)) => Ok(CreditDebit::Debited { remaining }),
            Some(Err(available)) => Ok(CreditDebit::Insufficient { available }),
            None => bail!("user {} not found", user_id),
        }
    }

    async fn credit_credits(&self, user_id: Uuid, amount: i64) -> Result<Option<i64>> {
        let outcome = self
            .db
            .users
            .try_update(&user_id, |user| {
                let Some(credits) = user.usage.ai_credits.checked_add(amount) else {
                    return Err(());
                };
                user.usage.ai_credits = credits;
                user.updated_at = Utc::now();
                Ok(credits)
            })
            .await;

        match outcome {
            Some(Ok(credits)) => Ok(Some(credits)),
            Some(Err(())) => Ok(None),
            None => bail!("user {} not found", user_id),
        }
    }
}
