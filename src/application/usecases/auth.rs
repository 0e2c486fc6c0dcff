use std::sync::Arc;

use anyhow::Result as AnyResult;
use chrono::Utc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    config::config_model::Auth,
    domain::{
        entities::users::{UserEntity, normalize_email},
        repositories::users::UserRepository,
        value_objects::{
            auth::{
                AuthDto, ChangePasswordRequest, DevLoginRequest, ForgotPasswordRequest,
                LoginRequest, MessageDto, RegisterRequest, ResetPasswordRequest, SessionClaims,
                SessionKind, UpdateProfileRequest, UserProfileDto,
            },
            enums::{subscription_tiers::SubscriptionTier, user_roles::UserRole},
        },
    },
    infrastructure::security::{
        one_time_tokens::{
            self, EMAIL_VERIFICATION_TTL_HOURS, OneTimeToken, PASSWORD_RESET_TTL_HOURS,
        },
        passwords::{hash_password, verify_password},
    },
};

use super::{
    errors::{UseCaseError, UseCaseResult, bad_request, forbidden, not_found},
    validation::{is_valid_email, required_text},
};

pub const MIN_PASSWORD_CHARS: usize = 8;
pub const DISPLAY_NAME_MAX_CHARS: usize = 50;
const DISPLAY_NAME_MIN_CHARS: usize = 2;
const DEVELOPER_CREDITS: i64 = 1000;

/// Signs and checks session tokens.
#[cfg_attr(test, mockall::automock)]
pub trait SessionTokens: Send + Sync {
    fn issue(&self, user: &UserEntity, kind: SessionKind) -> AnyResult<String>;
    fn verify(&self, token: &str) -> AnyResult<SessionClaims>;
}

fn unauthorized(message: impl Into<String>) -> UseCaseError {
    UseCaseError::Unauthorized(message.into())
}

fn validate_password(password: &str) -> UseCaseResult<()> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(bad_request(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_CHARS
        )));
    }
    Ok(())
}

fn validate_display_name(display_name: &str) -> UseCaseResult<String> {
    let display_name = required_text("Display name", display_name, DISPLAY_NAME_MAX_CHARS)?;
    if display_name.chars().count() < DISPLAY_NAME_MIN_CHARS {
        return Err(bad_request(format!(
            "Display name must be at least {} characters",
            DISPLAY_NAME_MIN_CHARS
        )));
    }
    Ok(display_name)
}

pub struct AuthUseCase<U, T>
where
    U: UserRepository + Send + Sync + 'static,
    T: SessionTokens + 'static,
{
    user_repository: Arc<U>,
    session_tokens: Arc<T>,
    config: Auth,
}

impl<U, T> AuthUseCase<U, T>
where
    U: UserRepository + Send + Sync + 'static,
    T: SessionTokens + 'static,
{
    pub fn new(user_repository: Arc<U>, session_tokens: Arc<T>, config: Auth) -> Self {
        Self {
            user_repository,
            session_tokens,
            config,
        }
    }

    fn session(&self, user: &UserEntity, kind: SessionKind) -> UseCaseResult<AuthDto> {
        let token = self.session_tokens.issue(user, kind).map_err(|err| {
            error!(user_id = %user.id, error = ?err, "auth: failed to issue session token");
            err
        })?;

        Ok(AuthDto {
            token,
            user: user.into(),
            is_developer: kind == SessionKind::Developer,
        })
    }

    pub async fn register(&self, request: RegisterRequest) -> UseCaseResult<AuthDto> {
        let email = normalize_email(&request.email);
        if !is_valid_email(&email) {
            return Err(bad_request("Please provide a valid email address"));
        }
        validate_password(&request.password)?;
        let display_name = validate_display_name(&request.display_name)?;

        if self
            .user_repository
            .find_by_email(email.clone())
            .await?
            .is_some()
        {
            warn!(%email, "auth: email already registered");
            return Err(UseCaseError::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let mut user = UserEntity::new(&email, hash_password(&request.password)?, display_name, now);
        let verification = OneTimeToken::generate(EMAIL_VERIFICATION_TTL_HOURS, now);
        user.verification_token = Some(verification.digest);
        user.verification_token_expires = Some(verification.expires_at);

        let user = self.user_repository.insert(user).await.map_err(|err| {
            error!(%email, db_error = ?err, "auth: failed to insert user");
            err
        })?;

        info!(user_id = %user.id, "auth: user registered");
        debug!(user_id = %user.id, token = %verification.raw, "auth: email verification token issued");

        self.session(&user, SessionKind::Standard)
    }

    pub async fn login(&self, request: LoginRequest) -> UseCaseResult<AuthDto> {
        let email = normalize_email(&request.email);

        let Some(mut user) = self.user_repository.find_by_email(email.clone()).await? else {
            warn!(%email, "auth: login for unknown email");
            return Err(unauthorized("Invalid email or password"));
        };

        if !verify_password(&request.password, &user.password_hash)? {
            warn!(user_id = %user.id, "auth: wrong password");
            return Err(unauthorized("Invalid email or password"));
        }

        user.record_login(Utc::now());
        let user = self.user_repository.update(user).await?;

        info!(user_id = %user.id, login_count = user.usage.login_count, "auth: user logged in");
        self.session(&user, SessionKind::Standard)
    }

    pub fn profile(&self, user: &UserEntity) -> UserProfileDto {
        user.into()
    }

    pub async fn update_profile(
        &self,
        mut user: UserEntity,
        request: UpdateProfileRequest,
    ) -> UseCaseResult<UserProfileDto> {
        if let Some(display_name) = request.display_name {
            user.display_name = validate_display_name(&display_name)?;
        }
        if let Some(avatar) = request.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(preferences) = request.preferences {
            preferences.apply(&mut user.preferences);
        }
        user.updated_at = Utc::now();

        let user = self.user_repository.update(user).await?;
        info!(user_id = %user.id, "auth: profile updated");

        Ok((&user).into())
    }

    pub async fn change_password(
        &self,
        mut user: UserEntity,
        request: ChangePasswordRequest,
    ) -> UseCaseResult<MessageDto> {
        if !verify_password(&request.current_password, &user.password_hash)? {
            warn!(user_id = %user.id, "auth: wrong current password");
            return Err(unauthorized("Current password is incorrect"));
        }
        validate_password(&request.new_password)?;

        user.password_hash = hash_password(&request.new_password)?;
        user.updated_at = Utc::now();
        let user = self.user_repository.update(user).await?;

        info!(user_id = %user.id, "auth: password changed");
        Ok(MessageDto::new("Password changed successfully"))
    }

    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> UseCaseResult<MessageDto> {
        let email = normalize_email(&request.email);

        let mut user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| not_found("No user found with this email"))?;

        let reset = OneTimeToken::generate(PASSWORD_RESET_TTL_HOURS, Utc::now());
        user.reset_password_token = Some(reset.digest);
        user.reset_password_expires = Some(reset.expires_at);
        let user = self.user_repository.update(user).await?;

        info!(user_id = %user.id, "auth: password reset requested");
        debug!(user_id = %user.id, token = %reset.raw, "auth: password reset token issued");

        Ok(MessageDto::new("Password reset instructions have been sent"))
    }

    pub async fn reset_password(
        &self,
        token: &str,
        request: ResetPasswordRequest,
    ) -> UseCaseResult<AuthDto> {
        let now = Utc::now();
        let mut user = self
            .user_repository
            .find_by_reset_token(one_time_tokens::digest(token))
            .await?
            .filter(|user| user.reset_password_expires.is_some_and(|expires| expires > now))
            .ok_or_else(|| bad_request("Invalid or expired reset token"))?;

        validate_password(&request.password)?;

        user.password_hash = hash_password(&request.password)?;
        user.clear_reset_token();
        user.updated_at = now;
        let user = self.user_repository.update(user).await?;

        info!(user_id = %user.id, "auth: password reset");
        self.session(&user, SessionKind::Standard)
    }

    pub async fn verify_email(&self, token: &str) -> UseCaseResult<MessageDto> {
        let now = Utc::now();
        let mut user = self
            .user_repository
            .find_by_verification_token(one_time_tokens::digest(token))
            .await?
            .filter(|user| {
                user.verification_token_expires
                    .is_some_and(|expires| expires > now)
            })
            .ok_or_else(|| bad_request("Invalid or expired verification token"))?;

        user.mark_verified(now);
        let user = self.user_repository.update(user).await?;

        info!(user_id = %user.id, "auth: email verified");
        Ok(MessageDto::new("Email verified successfully"))
    }

    /// Owner-only shortcut that yields a 24 hour admin session.
    pub async fn dev_login(&self, request: DevLoginRequest) -> UseCaseResult<AuthDto> {
        let key_matches = self
            .config
            .dev_access_key
            .as_deref()
            .is_some_and(|key| !key.is_empty() && key == request.dev_key);
        if !key_matches {
            warn!("auth: developer login with invalid key");
            return Err(forbidden("Invalid developer access key"));
        }

        let email = normalize_email(&request.email);
        if self.config.owner_email.as_deref() != Some(email.as_str()) {
            warn!(%email, "auth: developer login for non-owner");
            return Err(unauthorized("Only the owner can sign in as developer"));
        }

        let user = match self.user_repository.find_by_email(email.clone()).await? {
            Some(user) => user,
            None => self.provision_owner(&email).await?,
        };

        info!(user_id = %user.id, "auth: developer session issued");
        self.session(&user, SessionKind::Developer)
    }

    async fn provision_owner(&self, email: &str) -> UseCaseResult<UserEntity> {
        let now = Utc::now();
        let unusable_password = OneTimeToken::generate(0, now).raw;
        let mut owner = UserEntity::new(
            email,
            hash_password(&unusable_password)?,
            "Developer".to_string(),
            now,
        );
        owner.role = UserRole::Admin;
        owner.is_verified = true;
        owner.subscription.plan = SubscriptionTier::Enterprise;
        owner.usage.ai_credits = DEVELOPER_CREDITS;

        let owner = self.user_repository.insert(owner).await?;
        info!(user_id = %owner.id, "auth: owner account provisioned");
        Ok(owner)
    }

    pub fn verify_token(&self, token: &str) -> UseCaseResult<SessionClaims> {
        self.session_tokens.verify(token).map_err(|err| {
            debug!(error = ?err, "auth: token rejected");
            unauthorized("Invalid or expired token")
        })
    }

    /// Resolves verified claims to the stored user they name.
    pub async fn authenticate(&self, claims: &SessionClaims) -> UseCaseResult<UserEntity> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| unauthorized("Invalid user id in token"))?;

        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(%user_id, "auth: token for missing user");
                unauthorized("User not found")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::users::MockUserRepository;
    use chrono::Duration;
    use mockall::predicate::eq;

    fn config() -> Auth {
        Auth {
            jwt_secret: "secret".to_string(),
            jwt_expires_in_days: 7,
            dev_access_key: Some("dev-key".to_string()),
            owner_email: Some("owner@edaivi.com".to_string()),
        }
    }

    fn tokens() -> MockSessionTokens {
        let mut tokens = MockSessionTokens::new();
        tokens
            .expect_issue()
            .returning(|user, _| Ok(format!("token-{}", user.id)));
        tokens
    }

    fn stored_user(password: &str) -> UserEntity {
        UserEntity::new(
            "jane@example.com",
            hash_password(password).unwrap(),
            "Jane".to_string(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let existing = stored_user("password1");
        let mut user_repository = MockUserRepository::new();
        user_repository
            .expect_find_by_email()
            .with(eq("jane@example.com".to_string()))
            .returning(move |_| {
                let user = existing.clone();
                Box::pin(async move { Ok(Some(user)) })
            });
        let usecase = AuthUseCase::new(Arc::new(user_repository), Arc::new(tokens()), config());

        let err = usecase
            .register(RegisterRequest {
                email: "Jane@Example.com".to_string(),
                password: "password1".to_string(),
                display_name: "Jane".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::Conflict(_)));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_validates_before_touching_storage() {
        let usecase = AuthUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(tokens()),
            config(),
        );

        for (email, password, display_name) in [
            ("not-an-email", "password1", "Jane"),
            ("jane@example.com", "short", "Jane"),
            ("jane@example.com", "password1", "J"),
        ] {
            let err = usecase
                .register(RegisterRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                    display_name: display_name.to_string(),
                })
                .await
                .unwrap_err();
            assert!(matches!(err, UseCaseError::BadRequest(_)), "{}", err);
        }
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let existing = stored_user("password1");
        let mut user_repository = MockUserRepository::new();
        user_repository.expect_find_by_email().returning(move |_| {
            let user = existing.clone();
            Box::pin(async move { Ok(Some(user)) })
        });
        let usecase = AuthUseCase::new(Arc::new(user_repository), Arc::new(tokens()), config());

        let err = usecase
            .login(LoginRequest {
                email: "jane@example.com".to_string(),
                password: "password2".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn login_counts_the_session() {
        let existing = stored_user("password1");
        let mut user_repository = MockUserRepository::new();
        user_repository.expect_find_by_email().returning(move |_| {
            let user = existing.clone();
            Box::pin(async move { Ok(Some(user)) })
        });
        user_repository
            .expect_update()
            .withf(|user| user.usage.login_count == 1 && user.usage.last_login.is_some())
            .times(1)
            .returning(|user| Box::pin(async move { Ok(user) }));
        let usecase = AuthUseCase::new(Arc::new(user_repository), Arc::new(tokens()), config());

        let session = usecase
            .login(LoginRequest {
                email: "jane@example.com".to_string(),
                password: "password1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(session.token, format!("token-{}", session.user.id));
        assert!(!session.is_developer);
    }

    #[tokio::test]
    async fn expired_reset_token_is_rejected() {
        let mut existing = stored_user("password1");
        existing.reset_password_token = Some(one_time_tokens::digest("raw"));
        existing.reset_password_expires = Some(Utc::now() - Duration::minutes(1));
        let mut user_repository = MockUserRepository::new();
        user_repository
            .expect_find_by_reset_token()
            .with(eq(one_time_tokens::digest("raw")))
            .returning(move |_| {
                let user = existing.clone();
                Box::pin(async move { Ok(Some(user)) })
            });
        let usecase = AuthUseCase::new(Arc::new(user_repository), Arc::new(tokens()), config());

        let err = usecase
            .reset_password(
                "raw",
                ResetPasswordRequest {
                    password: "new-password".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid or expired reset token");
    }

    #[tokio::test]
    async fn dev_login_checks_key_then_owner() {
        let usecase = AuthUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(tokens()),
            config(),
        );

        let wrong_key = usecase
            .dev_login(DevLoginRequest {
                email: "owner@edaivi.com".to_string(),
                dev_key: "guess".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(wrong_key, UseCaseError::Forbidden(_)));

        let not_owner = usecase
            .dev_login(DevLoginRequest {
                email: "someone@edaivi.com".to_string(),
                dev_key: "dev-key".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(not_owner, UseCaseError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn dev_login_provisions_enterprise_owner() {
        let mut user_repository = MockUserRepository::new();
        user_repository
            .expect_find_by_email()
            .returning(|_| Box::pin(async { Ok(None) }));
        user_repository
            .expect_insert()
            .withf(|user| {
                user.role == UserRole::Admin
                    && user.tier() == SubscriptionTier::Enterprise
                    && user.is_verified
            })
            .times(1)
            .returning(|user| Box::pin(async move { Ok(user) }));
        let mut session_tokens = MockSessionTokens::new();
        session_tokens
            .expect_issue()
            .withf(|_, kind| *kind == SessionKind::Developer)
            .returning(|_, _| Ok("dev-token".to_string()));
        let usecase = AuthUseCase::new(
            Arc::new(user_repository),
            Arc::new(session_tokens),
            config(),
        );

        let session = usecase
            .dev_login(DevLoginRequest {
                email: "Owner@edaivi.com".to_string(),
                dev_key: "dev-key".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(session.token, "dev-token");
        assert!(session.is_developer);
    }

    #[tokio::test]
    async fn token_for_deleted_user_is_unauthorized() {
        let user_id = Uuid::new_v4();
        let mut user_repository = MockUserRepository::new();
        user_repository
            .expect_find_by_id()
            .with(eq(user_id))
            .returning(|_| Box::pin(async { Ok(None) }));
        let usecase = AuthUseCase::new(
            Arc::new(user_repository),
            Arc::new(MockSessionTokens::new()),
            config(),
        );
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: 0,
            exp: usize::MAX,
            is_developer: false,
            role: None,
        };

        let err = usecase.authenticate(&claims).await.unwrap_err();

        assert!(matches!(err, UseCaseError::Unauthorized(_)));
    }

    #[test]
    fn rejected_token_is_unauthorized() {
        let mut session_tokens = MockSessionTokens::new();
        session_tokens
            .expect_verify()
            .returning(|_| Err(anyhow::anyhow!("bad signature")));
        let usecase = AuthUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(session_tokens),
            config(),
        );

        let err = usecase.verify_token("garbage").unwrap_err();

        assert_eq!(err.to_string(), "Invalid or expired token");
    }
}
