//! Authentication service trait.

use crate::dto::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, UserResponse};
use async_trait::async_trait;
use emporium_core::{EmporiumResult, UserId};

/// Authentication and account lifecycle operations.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Registers a new account and returns a token pair.
    async fn register(&self, request: RegisterRequest) -> EmporiumResult<AuthResponse>;

    /// Authenticates by username or email and returns a token pair.
    async fn login(&self, request: LoginRequest) -> EmporiumResult<AuthResponse>;

    /// Exchanges a valid refresh token for a fresh token pair.
    async fn refresh(&self, request: RefreshTokenRequest) -> EmporiumResult<AuthResponse>;

    /// Returns the account behind an authenticated principal.
    async fn current_user(&self, user_id: UserId) -> EmporiumResult<UserResponse>;
}
