//! Products Service 入口

use std::net::SocketAddr;
use std::sync::Arc;

use products_service::api::{self, AppState};
use products_service::infrastructure::persistence::PostgresProductRepository;
use products_service::migrations;
use secrecy::ExposeSecret;
use tienda_adapter_postgres::{MigrationManager, PostgresConfig, check_connection};
use tienda_auth_core::ApiKeyService;
use tienda_config::AppConfig;
use tienda_telemetry::{init_tracing, init_tracing_json};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load("config")?;

    if config.is_production() {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }

    let pool = PostgresConfig::new(config.database.url.expose_secret())
        .with_max_connections(config.database.max_connections)
        .connect()
        .await?;
    check_connection(&pool).await?;

    MigrationManager::new(pool.clone())
        .migrate(&migrations::migrations())
        .await?;

    let state = AppState {
        products: Arc::new(PostgresProductRepository::new(pool)),
    };
    let keys = ApiKeyService::new(&config.auth.key);
    let app = api::app(state, keys);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(%addr, service = %config.app_name, "Starting products service");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
