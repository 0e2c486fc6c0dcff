use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::{ai_models::AiModelEntity, users::UserEntity},
    repositories::{
        ai_models::AiModelRepository,
        users::{CreditDebit, UserRepository},
    },
    value_objects::{enums::ai_model_types::GenerationKind, usage::UsageSample},
};

use super::errors::{UseCaseError, UseCaseResult, bad_request, forbidden, not_found};

pub fn insufficient_credits(required: i64, available: i64) -> UseCaseError {
    forbidden(format!(
        "This model requires {} credits, you have {}",
        required, available
    ))
}

/// Availability and tier checks shared by catalog reads and generation.
pub fn check_model_access(user: &UserEntity, model: &AiModelEntity) -> UseCaseResult<()> {
    check_model_rules(user, model, None)
}

/// Admission policy in rejection order: inactive, wrong kind, tier, credits.
pub fn evaluate_admission(
    user: &UserEntity,
    model: &AiModelEntity,
    kind: GenerationKind,
) -> UseCaseResult<()> {
    check_model_rules(user, model, Some(kind))?;

    if user.usage.ai_credits < model.credits_per_use {
        return Err(insufficient_credits(
            model.credits_per_use,
            user.usage.ai_credits,
        ));
    }

    Ok(())
}

fn check_model_rules(
    user: &UserEntity,
    model: &AiModelEntity,
    kind: Option<GenerationKind>,
) -> UseCaseResult<()> {
    if !model.is_active {
        return Err(forbidden("This AI model is currently unavailable"));
    }

    if let Some(kind) = kind {
        if !kind.accepts(model.model_type) {
            return Err(bad_request(format!(
                "This model cannot be used for {} generation",
                kind
            )));
        }
    }

    let required = model.required_tier();
    if !user.tier().satisfies(required) {
        return Err(forbidden(format!(
            "This model requires subscription tier {} or higher",
            required
        )));
    }

    Ok(())
}

/// Proof that credits were taken for one generation against `model`.
#[derive(Debug, Clone, PartialEq)]
pub struct Admission {
    pub user_id: Uuid,
    pub model: AiModelEntity,
    pub credits_used: i64,
    pub remaining_credits: i64,
}

pub struct CreditGate<U, M>
where
    U: UserRepository + Send + Sync + 'static,
    M: AiModelRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    ai_model_repository: Arc<M>,
}

impl<U, M> CreditGate<U, M>
where
    U: UserRepository + Send + Sync + 'static,
    M: AiModelRepository + Send + Sync + 'static,
{
    pub fn new(user_repository: Arc<U>, ai_model_repository: Arc<M>) -> Self {
        Self {
            user_repository,
            ai_model_repository,
        }
    }

    pub async fn admit(
        &self,
        user: &UserEntity,
        model_id: Uuid,
        kind: GenerationKind,
    ) -> UseCaseResult<Admission> {
        let user_id = user.id;

        let model = self
            .ai_model_repository
            .find_by_id(model_id)
            .await
            .map_err(|err| {
                error!(%user_id, %model_id, db_error = ?err, "credit_gate: failed to load model");
                err
            })?
            .ok_or_else(|| {
                warn!(%user_id, %model_id, "credit_gate: model not found");
                not_found("AI model not found")
            })?;

        if let Err(rejection) = evaluate_admission(user, &model, kind) {
            warn!(
                %user_id,
                %model_id,
                kind = %kind,
                reason = %rejection,
                "credit_gate: admission rejected"
            );
            return Err(rejection);
        }

        let remaining_credits = match self
            .user_repository
            .debit_credits(user_id, model.credits_per_use)
            .await
            .map_err(|err| {
                error!(%user_id, %model_id, db_error = ?err, "credit_gate: failed to debit credits");
                err
            })? {
            CreditDebit::Debited { remaining } => remaining,
            CreditDebit::Insufficient { available } => {
                warn!(
                    %user_id,
                    %model_id,
                    available,
                    required = model.credits_per_use,
                    "credit_gate: balance changed before debit"
                );
                return Err(insufficient_credits(model.credits_per_use, available));
            }
        };

        info!(
            %user_id,
            %model_id,
            kind = %kind,
            credits_used = model.credits_per_use,
            remaining_credits,
            "credit_gate: admitted"
        );

        Ok(Admission {
            user_id,
            credits_used: model.credits_per_use,
            remaining_credits,
            model,
        })
    }

    /// Folds the finished generation into the model's usage statistics.
    /// Credits stay debited even when recording fails.
    pub async fn settle(&self, admission: &Admission, sample: UsageSample) {
        let user_id = admission.user_id;
        let model_id = admission.model.id;

        match self
            .ai_model_repository
            .record_usage(model_id, user_id, sample)
            .await
        {
            Ok(stats) => info!(
                %user_id,
                %model_id,
                total_usage = stats.total_usage,
                last_used = ?stats.last_used,
                "credit_gate: usage recorded"
            ),
            Err(err) => error!(
                %user_id,
                %model_id,
                db_error = ?err,
                "credit_gate: failed to record usage"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::domain::{
        entities::ai_models::ModelRestrictions,
        repositories::{ai_models::MockAiModelRepository, users::MockUserRepository},
        value_objects::{
            enums::{
                ai_model_types::{AiModelCategory, AiModelType, AiProvider},
                subscription_tiers::SubscriptionTier,
            },
            usage::UsageStats,
        },
    };
    use mockall::predicate::eq;

    fn user(tier: SubscriptionTier, credits: i64) -> UserEntity {
        let mut user = UserEntity::new("gate@example.com", "hash".into(), "Gate".into(), Utc::now());
        user.subscription.plan = tier;
        user.usage.ai_credits = credits;
        user
    }

    fn model(model_type: AiModelType, min_tier: SubscriptionTier, credits: i64) -> AiModelEntity {
        let now = Utc::now();
        AiModelEntity {
            id: Uuid::new_v4(),
            name: "model".into(),
            display_name: "Model".into(),
            description: String::new(),
            model_type,
            category: AiModelCategory::Text,
            provider: AiProvider::Internal,
            current_version: "1.0.0".into(),
            tags: Vec::new(),
            is_active: true,
            is_featured: false,
            credits_per_use: credits,
            cost_per_use: 0.01,
            restrictions: ModelRestrictions {
                min_user_level: min_tier,
                ..ModelRestrictions::default()
            },
            usage_stats: UsageStats::default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn gate_with_model(
        model: AiModelEntity,
        user_repository: MockUserRepository,
    ) -> CreditGate<MockUserRepository, MockAiModelRepository> {
        let mut ai_model_repository = MockAiModelRepository::new();
        ai_model_repository
            .expect_find_by_id()
            .with(eq(model.id))
            .returning(move |_| {
                let model = model.clone();
                Box::pin(async move { Ok(Some(model)) })
            });

        CreditGate::new(Arc::new(user_repository), Arc::new(ai_model_repository))
    }

    #[tokio::test]
    async fn zero_credit_user_is_rejected_without_debit() {
        let user = user(SubscriptionTier::Free, 0);
        let model = model(AiModelType::TextGeneration, SubscriptionTier::Free, 1);
        let model_id = model.id;
        // No debit expectation: a call would fail the test.
        let gate = gate_with_model(model, MockUserRepository::new());

        let err = gate
            .admit(&user, model_id, GenerationKind::Text)
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::Forbidden(_)));
        assert_eq!(err.to_string(), "This model requires 1 credits, you have 0");
    }

    #[tokio::test]
    async fn tier_is_checked_before_credits() {
        let user = user(SubscriptionTier::Free, 0);
        let model = model(AiModelType::TextGeneration, SubscriptionTier::Pro, 5);
        let model_id = model.id;
        let gate = gate_with_model(model, MockUserRepository::new());

        let err = gate
            .admit(&user, model_id, GenerationKind::Text)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "This model requires subscription tier pro or higher"
        );
    }

    #[test]
    fn admission_holds_exactly_when_active_tier_and_credits_allow() {
        let price = 5;
        for min_tier in SubscriptionTier::ALL {
            for tier in SubscriptionTier::ALL {
                for credits in [price - 1, price, price + 1] {
                    for is_active in [true, false] {
                        let user = user(tier, credits);
                        let mut model = model(AiModelType::TextGeneration, min_tier, price);
                        model.is_active = is_active;

                        let expected = is_active && tier >= min_tier && credits >= price;
                        let admitted =
                            evaluate_admission(&user, &model, GenerationKind::Text).is_ok();

                        assert_eq!(
                            admitted, expected,
                            "tier {} min {} credits {} active {}",
                            tier, min_tier, credits, is_active
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn exact_price_and_exact_tier_are_admitted() {
        let user = user(SubscriptionTier::Pro, 5);
        let model = model(AiModelType::TextGeneration, SubscriptionTier::Pro, 5);

        assert!(evaluate_admission(&user, &model, GenerationKind::Text).is_ok());
    }

    #[tokio::test]
    async fn inactive_model_wins_over_every_other_rejection() {
        let user = user(SubscriptionTier::Free, 0);
        let mut model = model(AiModelType::ImageGeneration, SubscriptionTier::Enterprise, 9);
        model.is_active = false;
        let model_id = model.id;
        let gate = gate_with_model(model, MockUserRepository::new());

        let err = gate
            .admit(&user, model_id, GenerationKind::Text)
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::Forbidden(_)));
        assert_eq!(err.to_string(), "This AI model is currently unavailable");
    }

    #[tokio::test]
    async fn wrong_model_type_is_a_bad_request() {
        let user = user(SubscriptionTier::Enterprise, 100);
        let model = model(AiModelType::ImageGeneration, SubscriptionTier::Free, 1);
        let model_id = model.id;
        let gate = gate_with_model(model, MockUserRepository::new());

        let err = gate
            .admit(&user, model_id, GenerationKind::Audio)
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::BadRequest(_)));
    }

    #[tokio::test]
    async fn unknown_model_is_not_found() {
        let user = user(SubscriptionTier::Free, 100);
        let mut ai_model_repository = MockAiModelRepository::new();
        ai_model_repository
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));
        let gate = CreditGate::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(ai_model_repository),
        );

        let err = gate
            .admit(&user, Uuid::new_v4(), GenerationKind::Text)
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::NotFound(_)));
    }

    #[tokio::test]
    async fn lost_debit_race_reports_current_balance() {
        let user = user(SubscriptionTier::Free, 5);
        let model = model(AiModelType::TextToSpeech, SubscriptionTier::Free, 3);
        let model_id = model.id;
        let mut user_repository = MockUserRepository::new();
        user_repository
            .expect_debit_credits()
            .with(eq(user.id), eq(3))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(CreditDebit::Insufficient { available: 1 }) }));
        let gate = gate_with_model(model, user_repository);

        let err = gate
            .admit(&user, model_id, GenerationKind::Audio)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "This model requires 3 credits, you have 1");
    }

    #[tokio::test]
    async fn admitted_generation_debits_exactly_the_model_price() {
        let user = user(SubscriptionTier::Basic, 10);
        let model = model(AiModelType::TextGeneration, SubscriptionTier::Basic, 2);
        let model_id = model.id;
        let mut user_repository = MockUserRepository::new();
        user_repository
            .expect_debit_credits()
            .with(eq(user.id), eq(2))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(CreditDebit::Debited { remaining: 8 }) }));
        let gate = gate_with_model(model, user_repository);

        let admission = gate
            .admit(&user, model_id, GenerationKind::Text)
            .await
            .unwrap();

        assert_eq!(admission.credits_used, 2);
        assert_eq!(admission.remaining_credits, 8);
        assert_eq!(admission.model.id, model_id);
    }

    #[tokio::test]
    async fn settle_records_the_sample() {
        let user = user(SubscriptionTier::Free, 10);
        let model = model(AiModelType::TextGeneration, SubscriptionTier::Free, 1);
        let sample = UsageSample {
            processing_time_ms: 12.0,
            token_count: 5.0,
            cost: 0.01,
        };
        let mut ai_model_repository = MockAiModelRepository::new();
        ai_model_repository
            .expect_record_usage()
            .with(eq(model.id), eq(user.id), eq(sample))
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(UsageStats::default()) }));
        let gate = CreditGate::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(ai_model_repository),
        );

        gate.settle(
            &Admission {
                user_id: user.id,
                model,
                credits_used: 1,
                remaining_credits: 9,
            },
            sample,
        )
        .await;
    }
}
