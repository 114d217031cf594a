//! RBAC permission checker.

use crate::Claims;
use emporium_core::{EmporiumError, EmporiumResult, UserId, UserRole};

/// Extension trait for Claims to check permissions.
pub trait ClaimsExt {
    /// Requires a specific role.
    fn require_role(&self, role: UserRole) -> EmporiumResult<()>;

    /// Requires either the specified role or being the resource owner.
    fn require_role_or_owner(&self, role: UserRole, resource_owner_id: UserId)
        -> EmporiumResult<()>;

    /// Checks if the user is the owner of a resource.
    fn is_owner(&self, resource_owner_id: UserId) -> bool;

    /// Requires the user to be an admin.
    fn require_admin(&self) -> EmporiumResult<()>;
}

impl ClaimsExt for Claims {
    fn require_role(&self, role: UserRole) -> EmporiumResult<()> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(EmporiumError::Forbidden(format!(
                "Required role: {}, your role: {}",
                role, self.role
            )))
        }
    }

    fn require_role_or_owner(
        &self,
        role: UserRole,
        resource_owner_id: UserId,
    ) -> EmporiumResult<()> {
        if self.has_role(role) || self.is_owner(resource_owner_id) {
            Ok(())
        } else {
            Err(EmporiumError::Forbidden(
                "You don't have permission to access this resource".to_string(),
            ))
        }
    }

    fn is_owner(&self, resource_owner_id: UserId) -> bool {
        self.user_id()
            .map(|id| id == resource_owner_id)
            .unwrap_or(false)
    }

    fn require_admin(&self) -> EmporiumResult<()> {
        self.require_role(UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenType;
    use chrono::{Duration, Utc};

    fn create_claims(role: UserRole) -> Claims {
        Claims::new(
            UserId::new(),
            "testuser".to_string(),
            "test@example.com".to_string(),
            role,
            TokenType::Access,
            "issuer".to_string(),
            "audience".to_string(),
            Utc::now() + Duration::hours(1),
        )
    }

    #[test]
    fn test_require_role() {
        let admin_claims = create_claims(UserRole::Admin);
        let user_claims = create_claims(UserRole::User);

        assert!(admin_claims.require_role(UserRole::User).is_ok());
        assert!(admin_claims.require_role(UserRole::Admin).is_ok());

        assert!(user_claims.require_role(UserRole::User).is_ok());
        assert!(user_claims.require_role(UserRole::Admin).is_err());
    }

    #[test]
    fn test_require_admin() {
        let user_claims = create_claims(UserRole::User);
        let admin_claims = create_claims(UserRole::Admin);

        assert!(user_claims.require_admin().is_err());
        assert!(admin_claims.require_admin().is_ok());
    }

    #[test]
    fn test_owner_access() {
        let claims = create_claims(UserRole::User);
        let owner_id = claims.user_id().unwrap();
        let other_id = UserId::new();

        assert!(claims.is_owner(owner_id));
        assert!(!claims.is_owner(other_id));

        assert!(claims.require_role_or_owner(UserRole::Admin, owner_id).is_ok());
        assert!(claims.require_role_or_owner(UserRole::Admin, other_id).is_err());
    }

    #[test]
    fn test_admin_can_access_any_resource() {
        let admin_claims = create_claims(UserRole::Admin);
        let random_owner = UserId::new();

        assert!(admin_claims
            .require_role_or_owner(UserRole::Admin, random_owner)
            .is_ok());
    }
}
