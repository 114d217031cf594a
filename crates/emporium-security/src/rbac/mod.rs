//! RBAC authorization.

mod checker;

pub use checker::*;
