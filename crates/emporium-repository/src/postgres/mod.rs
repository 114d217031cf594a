//! PostgreSQL repository implementations.

mod product_repository;
mod user_repository;

pub use product_repository::*;
pub use user_repository::*;
