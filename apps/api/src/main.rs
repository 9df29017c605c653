//! Shiftdesk API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use shiftdesk_core::AppError;
use tracing::{info, warn};

use crate::api_config::{ApiCommand, ApiConfig, init_tracing};
use crate::api_services::SchedulingPorts;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let ports = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = api_services::connect(database_url, config.db_max_connections).await?;
            api_services::run_migrations(&pool).await?;

            match config.command {
                ApiCommand::Migrate => {
                    info!("database migrations applied successfully");
                    return Ok(());
                }
                ApiCommand::Seed => {
                    dev_seed::run(pool).await?;
                    info!("development users seeded");
                    return Ok(());
                }
                ApiCommand::Serve => SchedulingPorts::postgres(pool),
            }
        }
        None => {
            warn!("DATABASE_URL is not set, using volatile in-memory storage");
            SchedulingPorts::in_memory(dev_seed::in_memory_directory())
        }
    };

    let app_state = api_services::build_app_state(ports);
    let app = api_router::build_router(app_state, &config.frontend_url)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind API listener: {error}")))?;

    info!(%address, "shiftdesk api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server failed: {error}")))
}
