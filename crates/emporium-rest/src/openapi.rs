//! OpenAPI documentation configuration.

use emporium_core::{ErrorResponse, FieldError, ProductId, UserId, UserRole};
use emporium_service::{
    AuthResponse, CreateProductRequest, CreateUserRequest, LoginRequest, MessageResponse,
    ProductResponse, RefreshTokenRequest, RegisterRequest, UpdateProductRequest,
    UpdateUserRequest, UpdateUserRoleRequest, UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Emporium API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Emporium API",
        version = "1.0.0",
        description = "Product catalog service with authentication and caching",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Product endpoints
        crate::controllers::product_controller::list_products,
        crate::controllers::product_controller::search_products,
        crate::controllers::product_controller::get_product,
        crate::controllers::product_controller::create_product,
        crate::controllers::product_controller::update_product,
        crate::controllers::product_controller::delete_product,
        // Auth endpoints
        crate::controllers::auth_controller::register,
        crate::controllers::auth_controller::login,
        crate::controllers::auth_controller::refresh_token,
        crate::controllers::auth_controller::get_current_user,
        // User endpoints
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::update_user_role,
        crate::controllers::user_controller::delete_user,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            // Core types
            ProductId,
            UserId,
            UserRole,
            ErrorResponse,
            FieldError,
            // Product DTOs
            CreateProductRequest,
            UpdateProductRequest,
            ProductResponse,
            // Auth DTOs
            LoginRequest,
            RegisterRequest,
            RefreshTokenRequest,
            AuthResponse,
            MessageResponse,
            // User DTOs
            CreateUserRequest,
            UpdateUserRequest,
            UpdateUserRoleRequest,
            UserResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "products", description = "Product catalog endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Security addon for JWT Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token authentication"))
                        .build(),
                ),
            );
        }
    }
}
