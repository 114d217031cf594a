//! User DTOs.

use chrono::{DateTime, Utc};
use emporium_core::{User, UserId, UserRole};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new user.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Request to update an existing user. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: Option<String>,

    pub is_active: Option<bool>,
}

/// Request to assign a user a new role.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateUserRoleRequest {
    pub role: UserRole,
}

/// User representation returned by the API. Never carries the password
/// hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        user.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emporium_core::ValidateExt;

    #[test]
    fn test_valid_create_request() {
        let request = CreateUserRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "Password1".to_string(),
        };
        assert!(request.validate_request().is_ok());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let request = CreateUserRequest {
            username: "alice".to_string(),
            email: "not-an-email".to_string(),
            password: "Password1".to_string(),
        };
        assert!(request.validate_request().is_err());
    }

    #[test]
    fn test_short_username_rejected() {
        let request = CreateUserRequest {
            username: "ab".to_string(),
            email: "ab@example.com".to_string(),
            password: "Password1".to_string(),
        };
        assert!(request.validate_request().is_err());
    }

    #[test]
    fn test_response_omits_password_hash() {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "argon2-hash".to_string(),
        );
        let response = UserResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("argon2-hash"));
        assert!(!json.contains("password"));
    }
}
