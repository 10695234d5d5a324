use axum_helpers::server::{close_postgres, create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before anything fallible, so startup errors get colored reports
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = postgres::connect_with_retry(&config.database, config.database.retry_config())
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        postgres::run_migrations::<migration::Migrator>(&db, config.app.name)
            .await
            .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;
    } else {
        info!("RUN_MIGRATIONS disabled, skipping migrations");
    }

    let state = AppState { config, db };

    let router = axum_helpers::create_router::<openapi::ApiDoc>(
        api::routes(&state),
        &state.config.server,
        &state.config.environment,
    )?;

    // /health: liveness with app name/version; /ready: database ping
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!(
        app = state.config.app.name,
        version = state.config.app.version,
        "Starting catalog API with graceful shutdown (30s timeout)"
    );

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        close_postgres(state.db, "catalog").await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
