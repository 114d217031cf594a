//! Domain entities and value objects.

pub mod product;
pub mod role;
pub mod user;

pub use product::{Product, ProductPatch};
pub use role::UserRole;
pub use user::User;
