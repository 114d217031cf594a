//! # Emporium Security
//!
//! Security module for Emporium providing JWT authentication,
//! password hashing, and RBAC authorization.

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::*;
pub use password::*;
pub use rbac::*;
