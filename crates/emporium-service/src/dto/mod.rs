//! Data transfer objects for the service layer.

mod auth_dto;
mod product_dto;
mod user_dto;

pub use auth_dto::*;
pub use product_dto::*;
pub use user_dto::*;
