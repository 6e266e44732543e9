//! Tenpin bowling scorer API server entry point.

use std::error::Error;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tenpin_core::clock::SystemClock;
use tenpin_core::repository::EventRepository;
use tenpin_event_store::in_memory_event_repository::InMemoryEventRepository;
use tenpin_event_store::pg_event_repository::PgEventRepository;

use tenpin_api::config::AppConfig;
use tenpin_api::error::AppError;
use tenpin_api::state::AppState;
use tenpin_api::{app, telemetry};

async fn event_repository(config: &AppConfig) -> Result<Arc<dyn EventRepository>, AppError> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; games are kept in memory");
        return Ok(Arc::new(InMemoryEventRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(database_url)
        .await?;

    let repository = PgEventRepository::new(pool);
    repository.run_migrations().await?;
    tracing::info!("connected to PostgreSQL event store");

    Ok(Arc::new(repository))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    let telemetry = telemetry::init_tracing(config.otlp_endpoint.as_deref())?;

    tracing::info!(
        otlp = telemetry.exports_traces(),
        "Starting Tenpin bowling scorer API server"
    );

    let app_state = AppState::new(Arc::new(SystemClock), event_repository(&config).await?);

    let addr = config.bind_address()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(AppError::from)?;

    axum::serve(listener, app(app_state))
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down");
        })
        .await
        .map_err(AppError::from)?;

    telemetry.shutdown();

    Ok(())
}
