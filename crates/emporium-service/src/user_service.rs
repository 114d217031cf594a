//! User service trait.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use async_trait::async_trait;
use emporium_core::{EmporiumResult, Page, PageRequest, UserId, UserRole};

/// Administrative operations over user accounts.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Fetches a single user by ID.
    async fn get_user(&self, id: UserId) -> EmporiumResult<UserResponse>;

    /// Lists users with pagination.
    async fn list_users(&self, page: PageRequest) -> EmporiumResult<Page<UserResponse>>;

    /// Creates a new user account.
    async fn create_user(&self, request: CreateUserRequest) -> EmporiumResult<UserResponse>;

    /// Partially updates a user account.
    async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> EmporiumResult<UserResponse>;

    /// Assigns a user a new role.
    async fn update_user_role(&self, id: UserId, role: UserRole) -> EmporiumResult<UserResponse>;

    /// Soft-deletes a user account.
    async fn delete_user(&self, id: UserId) -> EmporiumResult<()>;
}
