//! User service implementation.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use emporium_core::{
    EmporiumError, EmporiumResult, Page, PageRequest, User, UserId, UserRole, ValidateExt,
};
use emporium_repository::UserRepository;
use emporium_security::PasswordHasher;
use std::sync::Arc;
use tracing::info;

/// Default user service.
pub struct UserServiceImpl<R: UserRepository> {
    repository: Arc<R>,
    hasher: Arc<PasswordHasher>,
}

impl<R: UserRepository> UserServiceImpl<R> {
    #[must_use]
    pub fn new(repository: Arc<R>, hasher: Arc<PasswordHasher>) -> Self {
        Self { repository, hasher }
    }
}

#[async_trait]
impl<R: UserRepository> UserService for UserServiceImpl<R> {
    async fn get_user(&self, id: UserId) -> EmporiumResult<UserResponse> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EmporiumError::not_found("User", id))?;
        Ok(user.into())
    }

    async fn list_users(&self, page: PageRequest) -> EmporiumResult<Page<UserResponse>> {
        Ok(self.repository.find_all(page).await?.map(UserResponse::from))
    }

    async fn create_user(&self, request: CreateUserRequest) -> EmporiumResult<UserResponse> {
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
        info!("Created user {} ({})", saved.id, saved.username);

        Ok(saved.into())
    }

    async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> EmporiumResult<UserResponse> {
        request.validate_request()?;

        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EmporiumError::not_found("User", id))?;

        if let Some(email) = request.email {
            if !email.eq_ignore_ascii_case(&user.email)
                && self.repository.exists_by_email(&email).await?
            {
                return Err(EmporiumError::conflict(format!(
                    "Email '{}' is already registered",
                    email
                )));
            }
            user.email = email;
        }
        if let Some(password) = request.password {
            let password_hash = self.hasher.hash(&password)?;
            user.update_password(password_hash);
        }
        if let Some(is_active) = request.is_active {
            user.is_active = is_active;
        }

        let updated = self.repository.update(&user).await?;
        Ok(updated.into())
    }

    async fn update_user_role(&self, id: UserId, role: UserRole) -> EmporiumResult<UserResponse> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EmporiumError::not_found("User", id))?;

        user.change_role(role);
        let updated = self.repository.update(&user).await?;
        info!("Changed role of user {} to {}", updated.id, updated.role);

        Ok(updated.into())
    }

    async fn delete_user(&self, id: UserId) -> EmporiumResult<()> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(EmporiumError::not_found("User", id));
        }
        info!("Deleted user {}", id);
        Ok(())
    }
}
