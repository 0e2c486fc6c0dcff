use std::{sync::Arc, time::Instant};

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::users::UserEntity,
    repositories::{ai_models::AiModelRepository, users::UserRepository},
    value_objects::{
        ai_models::{
            AiModelDetailDto, AiModelFilter, AiModelSummaryDto, CreditsDto, GenerateRequest,
            GenerationDto, GenerationOutput, ModelRefDto,
        },
        enums::ai_model_types::GenerationKind,
        usage::UsageSample,
    },
};

use super::{
    credit_gate::{CreditGate, check_model_access},
    errors::{UseCaseResult, bad_request, not_found},
};

const GENERATED_BASE_URL: &str = "https://storage.edaivi.com/generated";
const MOCK_AUDIO_SECONDS: f64 = 10.5;
pub const MAX_CREDIT_PURCHASE: i64 = 1_000_000;

pub struct AiUseCase<U, M>
where
    U: UserRepository + Send + Sync + 'static,
    M: AiModelRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    ai_model_repository: Arc<M>,
    credit_gate: CreditGate<U, M>,
}

impl<U, M> AiUseCase<U, M>
where
    U: UserRepository + Send + Sync + 'static,
    M: AiModelRepository + Send + Sync + 'static,
{
    pub fn new(user_repository: Arc<U>, ai_model_repository: Arc<M>) -> Self {
        Self {
            credit_gate: CreditGate::new(
                Arc::clone(&user_repository),
                Arc::clone(&ai_model_repository),
            ),
            user_repository,
            ai_model_repository,
        }
    }

    /// Active models the caller's tier unlocks, featured first then by name.
    pub async fn list_models(
        &self,
        user: &UserEntity,
        mut filter: AiModelFilter,
    ) -> UseCaseResult<Vec<AiModelSummaryDto>> {
        filter.active = Some(true);

        let mut models = self
            .ai_model_repository
            .list(filter)
            .await
            .map_err(|err| {
                error!(user_id = %user.id, db_error = ?err, "ai: failed to list models");
                err
            })?;

        let tier = user.tier();
        models.retain(|model| tier.satisfies(model.required_tier()));
        models.sort_by(|a, b| {
            b.is_featured
                .cmp(&a.is_featured)
                .then_with(|| a.display_name.cmp(&b.display_name))
        });

        Ok(models.iter().map(AiModelSummaryDto::from).collect())
    }

    pub async fn get_model(&self, user: &UserEntity, model_id: Uuid) -> UseCaseResult<AiModelDetailDto> {
        let model = self
            .ai_model_repository
            .find_by_id(model_id)
            .await?
            .ok_or_else(|| not_found("AI model not found"))?;

        check_model_access(user, &model)?;

        Ok(AiModelDetailDto::from(&model))
    }

    pub async fn generate(
        &self,
        user: &UserEntity,
        kind: GenerationKind,
        request: GenerateRequest,
    ) -> UseCaseResult<GenerationDto> {
        let prompt = request
            .prompt
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let Some(model_id) = request.model_id.filter(|_| !prompt.is_empty()) else {
            warn!(user_id = %user.id, kind = %kind, "ai: missing model_id or prompt");
            return Err(bad_request("model_id and prompt are required"));
        };

        let started = Instant::now();
        let admission = self.credit_gate.admit(user, model_id, kind).await?;

        let now = Utc::now();
        let output = match kind {
            GenerationKind::Text => GenerationOutput::Text {
                text: format!(
                    "Generated text for prompt: \"{}\"\n\nThis is a demonstration response from {}.",
                    prompt, admission.model.display_name
                ),
            },
            GenerationKind::Image => GenerationOutput::Image {
                image_url: format!(
                    "{}/images/{}.jpg",
                    GENERATED_BASE_URL,
                    now.timestamp_millis()
                ),
            },
            GenerationKind::Audio => GenerationOutput::Audio {
                audio_url: format!(
                    "{}/audio/{}.mp3",
                    GENERATED_BASE_URL,
                    now.timestamp_millis()
                ),
                duration: MOCK_AUDIO_SECONDS,
            },
        };
        let processing_time = started.elapsed().as_millis() as u64;

        self.credit_gate
            .settle(
                &admission,
                UsageSample {
                    processing_time_ms: processing_time as f64,
                    token_count: prompt.chars().count() as f64,
                    cost: admission.model.cost_per_use,
                },
            )
            .await;

        info!(
            user_id = %user.id,
            %model_id,
            kind = %kind,
            processing_time,
            "ai: generation completed"
        );

        Ok(GenerationDto {
            output,
            model: ModelRefDto {
                id: admission.model.id,
                name: admission.model.display_name.clone(),
            },
            prompt,
            processing_time,
            credits_used: admission.credits_used,
            remaining_credits: admission.remaining_credits,
        })
    }

    pub fn credits(&self, user: &UserEntity) -> CreditsDto {
        CreditsDto {
            credits: user.usage.ai_credits,
            subscription: user.tier(),
        }
    }

    /// Adds credits directly; payment is not processed.
    pub async fn purchase_credits(&self, user: &UserEntity, amount: i64) -> UseCaseResult<CreditsDto> {
        if amount <= 0 {
            return Err(bad_request("amount must be a positive number"));
        }
        if amount > MAX_CREDIT_PURCHASE {
            return Err(bad_request(format!(
                "amount cannot exceed {} credits per purchase",
                MAX_CREDIT_PURCHASE
            )));
        }

        let credits = self
            .user_repository
            .credit_credits(user.id, amount)
            .await
            .map_err(|err| {
                error!(user_id = %user.id, amount, db_error = ?err, "ai: failed to add credits");
                err
            })?
            .ok_or_else(|| {
                warn!(user_id = %user.id, amount, "ai: credit balance limit reached");
                bad_request("Credit balance limit reached")
            })?;

        info!(user_id = %user.id, amount, credits, "ai: credits purchased");

        Ok(CreditsDto {
            credits,
            subscription: user.tier(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::ai_models::{AiModelEntity, ModelRestrictions},
        repositories::{
            ai_models::MockAiModelRepository,
            users::{CreditDebit, MockUserRepository},
        },
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
        let mut user = UserEntity::new("ai@example.com", "hash".into(), "Ai".into(), Utc::now());
        user.subscription.plan = tier;
        user.usage.ai_credits = credits;
        user
    }

    fn model(name: &str, featured: bool, min_tier: SubscriptionTier) -> AiModelEntity {
        let now = Utc::now();
        AiModelEntity {
            id: Uuid::new_v4(),
            name: name.to_lowercase(),
            display_name: name.to_string(),
            description: String::new(),
            model_type: AiModelType::TextGeneration,
            category: AiModelCategory::Text,
            provider: AiProvider::Internal,
            current_version: "1.0.0".into(),
            tags: Vec::new(),
            is_active: true,
            is_featured: featured,
            credits_per_use: 1,
            cost_per_use: 0.05,
            restrictions: ModelRestrictions {
                min_user_level: min_tier,
                ..ModelRestrictions::default()
            },
            usage_stats: UsageStats::default(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn list_hides_models_above_tier_and_puts_featured_first() {
        let models = vec![
            model("Zeta", false, SubscriptionTier::Free),
            model("Alpha", false, SubscriptionTier::Free),
            model("Omega", true, SubscriptionTier::Basic),
            model("Pro Only", true, SubscriptionTier::Pro),
        ];
        let mut ai_model_repository = MockAiModelRepository::new();
        ai_model_repository
            .expect_list()
            .withf(|filter| filter.active == Some(true))
            .returning(move |_| {
                let models = models.clone();
                Box::pin(async move { Ok(models) })
            });
        let usecase = AiUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(ai_model_repository),
        );

        let listed = usecase
            .list_models(&user(SubscriptionTier::Basic, 0), AiModelFilter::default())
            .await
            .unwrap();

        let names: Vec<_> = listed.iter().map(|m| m.display_name.as_str()).collect();
        assert_eq!(names, vec!["Omega", "Alpha", "Zeta"]);
    }

    #[tokio::test]
    async fn generation_requires_prompt() {
        let usecase = AiUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockAiModelRepository::new()),
        );

        let err = usecase
            .generate(
                &user(SubscriptionTier::Free, 10),
                GenerationKind::Text,
                GenerateRequest {
                    model_id: Some(Uuid::new_v4()),
                    prompt: Some("   ".into()),
                    ..GenerateRequest::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "model_id and prompt are required");
    }

    #[tokio::test]
    async fn text_generation_reports_credits_and_records_prompt_length() {
        let caller = user(SubscriptionTier::Free, 10);
        let caller_id = caller.id;
        let catalog_model = model("TextGen Basic", true, SubscriptionTier::Free);
        let model_id = catalog_model.id;

        let mut ai_model_repository = MockAiModelRepository::new();
        ai_model_repository
            .expect_find_by_id()
            .with(eq(model_id))
            .returning(move |_| {
                let model = catalog_model.clone();
                Box::pin(async move { Ok(Some(model)) })
            });
        ai_model_repository
            .expect_record_usage()
            .withf(move |id, user_id, sample| {
                *id == model_id
                    && *user_id == caller_id
                    && sample.token_count == 5.0
                    && sample.cost == 0.05
            })
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(UsageStats::default()) }));

        let mut user_repository = MockUserRepository::new();
        user_repository
            .expect_debit_credits()
            .with(eq(caller.id), eq(1))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(CreditDebit::Debited { remaining: 9 }) }));

        let usecase = AiUseCase::new(Arc::new(user_repository), Arc::new(ai_model_repository));

        let generated = usecase
            .generate(
                &caller,
                GenerationKind::Text,
                GenerateRequest {
                    model_id: Some(model_id),
                    prompt: Some("hello".into()),
                    ..GenerateRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(generated.credits_used, 1);
        assert_eq!(generated.remaining_credits, 9);
        assert_eq!(generated.model.name, "TextGen Basic");
        assert!(matches!(generated.output, GenerationOutput::Text { .. }));
    }

    #[tokio::test]
    async fn purchase_rejects_non_positive_amount() {
        let usecase = AiUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockAiModelRepository::new()),
        );

        let err = usecase
            .purchase_credits(&user(SubscriptionTier::Free, 0), 0)
            .await
            .unwrap_err();

        assert!(matches!(err, crate::application::usecases::errors::UseCaseError::BadRequest(_)));
    }

    #[tokio::test]
    async fn purchase_above_the_cap_is_refused_without_crediting() {
        // No credit expectation: a call would fail the test.
        let usecase = AiUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockAiModelRepository::new()),
        );

        let err = usecase
            .purchase_credits(&user(SubscriptionTier::Free, 100), i64::MAX)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("amount cannot exceed {} credits per purchase", MAX_CREDIT_PURCHASE)
        );
    }

    #[tokio::test]
    async fn purchase_that_would_overflow_the_balance_is_a_bad_request() {
        let buyer = user(SubscriptionTier::Free, i64::MAX - 1);
        let mut user_repository = MockUserRepository::new();
        user_repository
            .expect_credit_credits()
            .with(eq(buyer.id), eq(10))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(None) }));
        let usecase = AiUseCase::new(
            Arc::new(user_repository),
            Arc::new(MockAiModelRepository::new()),
        );

        let err = usecase.purchase_credits(&buyer, 10).await.unwrap_err();

        assert_eq!(err.to_string(), "Credit balance limit reached");
    }
}
