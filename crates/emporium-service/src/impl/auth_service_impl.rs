//! Authentication service implementation.

use crate::auth_service::AuthService;
use crate::dto::{
    AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, UserResponse,
};
use async_trait::async_trait;
use chrono::Utc;
use emporium_core::{EmporiumError, EmporiumResult, User, UserId, ValidateExt};
use emporium_repository::UserRepository;
use emporium_security::{PasswordHasher, TokenPair, TokenProvider};
use std::sync::Arc;
use tracing::{info, warn};

/// Default authentication service.
///
/// Refresh tokens are stateless; revocation happens by deactivating the
/// account, which is re-checked on every refresh.
pub struct AuthServiceImpl<R: UserRepository> {
    repository: Arc<R>,
    hasher: Arc<PasswordHasher>,
    tokens: Arc<TokenProvider>,
}

impl<R: UserRepository> AuthServiceImpl<R> {
    #[must_use]
    pub fn new(repository: Arc<R>, hasher: Arc<PasswordHasher>, tokens: Arc<TokenProvider>) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    fn auth_response(&self, pair: TokenPair, user: &User) -> AuthResponse {
        let expires_in = (pair.access_expires_at - Utc::now().timestamp()).max(0) as u64;
        AuthResponse::new(
            pair.access_token,
            pair.refresh_token,
            expires_in,
            UserResponse::from(user),
        )
    }
}

#[async_trait]
impl<R: UserRepository> AuthService for AuthServiceImpl<R> {
    async fn register(&self, request: RegisterRequest) -> EmporiumResult<AuthResponse> {
        request.validate_request()?;

        if self.repository.exists_by_username(&request.username).await? {
            return Err(EmporiumError::conflict(format!(
                "Username '{}' is already taken",
                request.username
            )));
        }
        if self.repository.exists_by_email(&request.email).await? {
            return Err(EmporiumError::conflict(format!(
                "Email '{}' is already registered",
                request.email
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(request.username, request.email, password_hash);
        let saved = self.repository.save(&user).await?;
        info!("Registered user {} ({})", saved.id, saved.username);

        let pair =
            self.tokens
                .generate_tokens(saved.id, &saved.username, &saved.email, saved.role)?;
        Ok(self.auth_response(pair, &saved))
    }

    async fn login(&self, request: LoginRequest) -> EmporiumResult<AuthResponse> {
        request.validate_request()?;

        let user = self
            .repository
            .find_by_username_or_email(&request.username_or_email)
            .await?
            .ok_or(EmporiumError::InvalidCredentials)?;

        if !user.can_login() {
            warn!("Login attempt for inactive account {}", user.id);
            return Err(EmporiumError::InvalidCredentials);
        }

        if !self.hasher.verify(&request.password, &user.password_hash)? {
            return Err(EmporiumError::InvalidCredentials);
        }

        info!("User {} logged in", user.id);
        let pair = self
            .tokens
            .generate_tokens(user.id, &user.username, &user.email, user.role)?;
        Ok(self.auth_response(pair, &user))
    }

    async fn refresh(&self, request: RefreshTokenRequest) -> EmporiumResult<AuthResponse> {
        request.validate_request()?;

        let claims = self.tokens.validate_refresh_token(&request.refresh_token)?;
        let user_id = claims
            .user_id()
            .ok_or_else(|| EmporiumError::InvalidToken("Token missing user ID".to_string()))?;

        // The account state may have changed since the token was issued.
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(EmporiumError::InvalidCredentials)?;
        if !user.can_login() {
            return Err(EmporiumError::InvalidCredentials);
        }

        let pair = self
            .tokens
            .generate_tokens(user.id, &user.username, &user.email, user.role)?;
        Ok(self.auth_response(pair, &user))
    }

    async fn current_user(&self, user_id: UserId) -> EmporiumResult<UserResponse> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| EmporiumError::not_found("User", user_id))?;
        Ok(user.into())
    }
}
