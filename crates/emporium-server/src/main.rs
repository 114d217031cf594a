//! # Emporium Server
//!
//! Main entry point. Wires configuration, database, cache, services,
//! and the REST router together explicitly.

use emporium_config::ConfigLoader;
use emporium_core::{EmporiumError, EmporiumResult};
use emporium_repository::{create_pool, PgProductRepository, PgUserRepository};
use emporium_rest::{create_router, AppState};
use emporium_security::{PasswordHasher, TokenProvider};
use emporium_service::{
    AuthService, AuthServiceImpl, ProductCache, ProductService, ProductServiceImpl,
    RedisCacheStore, UserService, UserServiceImpl,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    init_logging();

    info!("Starting Emporium server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> EmporiumResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    info!("Environment: {}", config.app.environment);

    let db_pool = create_pool(&config.database).await?;
    db_pool.run_migrations().await?;

    let cache_store = RedisCacheStore::connect(&config.redis).await;
    let product_cache = ProductCache::new(
        Arc::new(cache_store.clone()),
        config.redis.default_ttl(),
    );

    let product_repository = Arc::new(PgProductRepository::new(Arc::clone(&db_pool)));
    let user_repository = Arc::new(PgUserRepository::new(Arc::clone(&db_pool)));

    let security_config = Arc::new(config.security.clone());
    let password_hasher = Arc::new(PasswordHasher::new());
    let token_provider = Arc::new(TokenProvider::new(security_config));

    let product_service: Arc<dyn ProductService> = Arc::new(ProductServiceImpl::new(
        Arc::clone(&product_repository),
        product_cache,
    ));
    let user_service: Arc<dyn UserService> = Arc::new(UserServiceImpl::new(
        Arc::clone(&user_repository),
        Arc::clone(&password_hasher),
    ));
    let auth_service: Arc<dyn AuthService> = Arc::new(AuthServiceImpl::new(
        user_repository,
        password_hasher,
        Arc::clone(&token_provider),
    ));

    let app_state = AppState::new(product_service, user_service, auth_service);
    let router = create_router(app_state, token_provider, &config.server);

    let addr = config.server.addr();
    info!("Starting REST server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| EmporiumError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| EmporiumError::internal(format!("REST server error: {}", e)))?;

    cache_store.disconnect();
    db_pool.close().await;

    info!("Server shutdown complete");
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,emporium=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
