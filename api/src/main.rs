use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use us_api::{create_app, telemetry, AppState};
use us_core::services::{
    AuthServiceConfig, AuthenticationService, IdentityIdGenerator, Rs256KeyManager, TokenService,
    TokenServiceConfig,
};
use us_infra::{DatabasePool, MySqlAccountStore};
use us_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    telemetry::init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize tracing")?;

    info!(environment = %config.environment, "Starting UserService API server");

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    if !pool.health_check().await.context("database health check failed")? {
        anyhow::bail!("database health check returned an unexpected value");
    }
    pool.run_migrations()
        .await
        .context("failed to run database migrations")?;
    info!(stats = %pool.get_statistics(), "Database ready");
    let account_store = Arc::new(MySqlAccountStore::from_pool(&pool));

    let key_manager =
        Rs256KeyManager::from_config(&config.jwt).context("failed to load signing keys")?;
    info!(origin = key_manager.origin(), "Signing keys loaded");
    let token_service = Arc::new(TokenService::new(
        &key_manager,
        TokenServiceConfig::from(&config.jwt),
    ));

    let id_generator = Arc::new(
        IdentityIdGenerator::from_config(&config.identity)
            .context("invalid identity generator configuration")?,
    );
    info!(node_id = id_generator.node_id(), "Identity generator ready");

    let auth_service = Arc::new(AuthenticationService::new(
        account_store,
        token_service,
        id_generator,
        AuthServiceConfig::from_jwt_config(&config.jwt),
    ));
    let app_state = web::Data::new(AppState::new(auth_service));

    let bind_address = config.server.bind_address();
    let max_payload_size = config.server.max_payload_size;
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(app_state.clone(), max_payload_size));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    pool.close().await;

    Ok(())
}
