//! Service implementations.

mod auth_service_impl;
mod product_service_impl;
mod user_service_impl;

pub use auth_service_impl::AuthServiceImpl;
pub use product_service_impl::ProductServiceImpl;
pub use user_service_impl::UserServiceImpl;
