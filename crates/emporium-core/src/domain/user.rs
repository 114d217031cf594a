//! User entity.

use super::role::UserRole;
use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing an authenticated principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,

    /// Unique username.
    pub username: String,

    /// Unique email address.
    pub email: String,

    /// Argon2 hash of the password (never exposed via API).
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role gating which operations the user may perform.
    pub role: UserRole,

    /// Whether the account is active. Inactive users cannot authenticate.
    pub is_active: bool,

    /// Soft-delete flag.
    pub is_deleted: bool,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user with the default role.
    #[must_use]
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            email,
            password_hash,
            role: UserRole::User,
            is_active: true,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a new admin user.
    #[must_use]
    pub fn new_admin(username: String, email: String, password_hash: String) -> Self {
        let mut user = Self::new(username, email, password_hash);
        user.role = UserRole::Admin;
        user
    }

    /// Checks if the user is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// Checks if the user has the specified role or higher.
    #[must_use]
    pub const fn has_role(&self, required: UserRole) -> bool {
        self.role.has_permission(required)
    }

    /// Checks whether the user may authenticate.
    #[must_use]
    pub const fn can_login(&self) -> bool {
        self.is_active && !self.is_deleted
    }

    /// Deactivates the account.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Flags the user as deleted. The row is retained.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.updated_at = Utc::now();
    }

    /// Replaces the password hash.
    pub fn update_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Assigns a new role.
    pub fn change_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}
