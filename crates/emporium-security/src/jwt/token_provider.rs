//! JWT token provider for creating and validating tokens.

use super::{Claims, TokenType};
use chrono::{Duration, Utc};
use emporium_config::SecurityConfig;
use emporium_core::{EmporiumError, EmporiumResult, UserId, UserRole};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{debug, warn};

/// Token pair containing access and refresh tokens.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Access token (short-lived).
    pub access_token: String,
    /// Refresh token (long-lived).
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: i64,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: i64,
    /// Token type (always "Bearer").
    pub token_type: String,
}

/// JWT token provider service.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Generates a token pair for a user.
    pub fn generate_tokens(
        &self,
        user_id: UserId,
        username: &str,
        email: &str,
        role: UserRole,
    ) -> EmporiumResult<TokenPair> {
        let access_token =
            self.generate_token(user_id, username, email, role, TokenType::Access)?;
        let refresh_token =
            self.generate_token(user_id, username, email, role, TokenType::Refresh)?;

        let now = Utc::now();
        let access_expires_at =
            (now + Duration::seconds(self.config.jwt_access_expiration_secs as i64)).timestamp();
        let refresh_expires_at =
            (now + Duration::seconds(self.config.jwt_refresh_expiration_secs as i64)).timestamp();

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
            token_type: "Bearer".to_string(),
        })
    }

    /// Generates a single token of the given type.
    pub fn generate_token(
        &self,
        user_id: UserId,
        username: &str,
        email: &str,
        role: UserRole,
        token_type: TokenType,
    ) -> EmporiumResult<String> {
        let lifetime_secs = match token_type {
            TokenType::Access => self.config.jwt_access_expiration_secs,
            TokenType::Refresh => self.config.jwt_refresh_expiration_secs,
        };
        let expires_at = Utc::now() + Duration::seconds(lifetime_secs as i64);

        let claims = Claims::new(
            user_id,
            username.to_string(),
            email.to_string(),
            role,
            token_type,
            self.config.jwt_issuer.clone(),
            self.config.jwt_audience.clone(),
            expires_at,
        );

        let token = encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            EmporiumError::Internal(format!("Failed to generate {} token: {}", token_type, e))
        })?;

        debug!("Generated {} token for user {}", token_type, user_id);
        Ok(token)
    }

    /// Validates a token and returns the claims.
    pub fn validate_token(&self, token: &str) -> EmporiumResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                warn!("Token validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        EmporiumError::TokenExpired
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken
                    | jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        EmporiumError::InvalidToken("Invalid token signature".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        EmporiumError::InvalidToken("Invalid token issuer".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                        EmporiumError::InvalidToken("Invalid token audience".to_string())
                    }
                    _ => EmporiumError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Validates an access token specifically.
    pub fn validate_access_token(&self, token: &str) -> EmporiumResult<Claims> {
        let claims = self.validate_token(token)?;

        if !claims.is_access_token() {
            return Err(EmporiumError::InvalidToken(
                "Expected access token".to_string(),
            ));
        }

        Ok(claims)
    }

    /// Validates a refresh token specifically.
    pub fn validate_refresh_token(&self, token: &str) -> EmporiumResult<Claims> {
        let claims = self.validate_token(token)?;

        if !claims.is_refresh_token() {
            return Err(EmporiumError::InvalidToken(
                "Expected refresh token".to_string(),
            ));
        }

        Ok(claims)
    }

    /// Refreshes a token pair using a refresh token.
    pub fn refresh_tokens(&self, refresh_token: &str) -> EmporiumResult<TokenPair> {
        let claims = self.validate_refresh_token(refresh_token)?;

        let user_id = claims.user_id().ok_or_else(|| {
            EmporiumError::InvalidToken("Refresh token missing user ID".to_string())
        })?;

        self.generate_tokens(user_id, &claims.username, &claims.email, claims.role)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}
