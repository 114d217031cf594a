//! User role value object.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Role assigned to an authenticated user.
///
/// Admin covers everything a regular user may do; mutations of the product
/// catalog require [`UserRole::Admin`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    /// Checks whether this role satisfies the required role.
    #[must_use]
    pub const fn has_permission(&self, required: Self) -> bool {
        match required {
            Self::User => true,
            Self::Admin => matches!(self, Self::Admin),
        }
    }

    /// Returns the database/wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parses a role from its database representation, defaulting to `user`.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_hierarchy() {
        assert!(UserRole::Admin.has_permission(UserRole::User));
        assert!(UserRole::Admin.has_permission(UserRole::Admin));
        assert!(UserRole::User.has_permission(UserRole::User));
        assert!(!UserRole::User.has_permission(UserRole::Admin));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(UserRole::parse_or_default("admin"), UserRole::Admin);
        assert_eq!(UserRole::parse_or_default("user"), UserRole::User);
        assert_eq!(UserRole::parse_or_default("unknown"), UserRole::User);
    }
}
