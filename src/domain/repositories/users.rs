use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::users::UserEntity;

/// Outcome of a conditional credit deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditDebit {
    Debited { remaining: i64 },
    Insufficient { available: i64 },
}

#[async_trait]
#[automock]
pub trait UserRepository {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>>;
    async fn find_by_email(&self, email: String) -> Result<Option<UserEntity>>;
    async fn find_by_verification_token(&self, token_hash: String) -> Result<Option<UserEntity>>;
    async fn find_by_reset_token(&self, token_hash: String) -> Result<Option<UserEntity>>;
    async fn insert(&self, user: UserEntity) -> Result<UserEntity>;
    async fn update(&self, user: UserEntity) -> Result<UserEntity>;
    /// Deducts `amount` only when the balance covers it, as one atomic step.
    async fn debit_credits(&self, user_id: Uuid, amount: i64) -> Result<CreditDebit>;
    /// Adds `amount` and returns the new balance, or `None` when the balance
    /// would overflow. The balance is left untouched in that case.
    async fn credit_credits(&self, user_id: Uuid, amount: i64) -> Result<Option<i64>>;
}
