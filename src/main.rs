//! hook-relay server binary.
//!
//! Wires the Postgres-backed stores and the process-wide connection registry
//! into the application router and serves it.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use hook_relay::adapters::http::{build_router, AppDeps};
use hook_relay::adapters::postgres::{PostgresEndpointStore, PostgresSessionAuthenticator};
use hook_relay::adapters::websocket::InMemoryConnectionRegistry;
use hook_relay::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    // The registry is constructed exactly once and shared by reference with
    // the gateway and the webhook receiver for the life of the process.
    let deps = AppDeps {
        endpoint_store: Arc::new(PostgresEndpointStore::new(pool.clone())),
        authenticator: Arc::new(PostgresSessionAuthenticator::new(pool)),
        registry: Arc::new(InMemoryConnectionRegistry::new()),
    };

    let app = build_router(&deps, &config);
    let addr = config.server.socket_addr();

    tracing::info!(%addr, "hook-relay listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves when the process is asked to stop.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("ctrl-c handler installation should not fail");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation should not fail")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
