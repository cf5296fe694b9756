//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, file storage, and the Axum server
//! lifecycle.

use crate::application::services::ModelService;
use crate::config::Config;
use crate::infrastructure::persistence::PgModelRepository;
use crate::infrastructure::storage::LocalFileStorage;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Local file storage under `MEDIA_ROOT`
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The media root cannot be created
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let storage = LocalFileStorage::new(&config.media_root)
        .await
        .with_context(|| {
            format!(
                "Failed to initialize media root {}",
                config.media_root.display()
            )
        })?;
    tracing::info!(root = %storage.root().display(), "File storage ready");

    let repository = PgModelRepository::new(Arc::new(pool));
    let model_service = Arc::new(ModelService::new(Arc::new(repository), Arc::new(storage)));
    let state = AppState::new(model_service, config.media_url.as_str());

    let app = app_router(state, &config.media_root, config.max_upload_size);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
