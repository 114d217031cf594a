//! # Emporium Service
//!
//! Business logic service layer for Emporium. Contains the cache client,
//! the cache-aside policy for product reads, and the application services.

pub mod auth_service;
pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod product_service;
pub mod user_service;

pub use auth_service::*;
pub use cache::*;
pub use dto::*;
pub use product_service::*;
pub use r#impl::*;
pub use user_service::*;
