//! # PawTrack Server
//!
//! Main binary: loads config, connects to PostgreSQL, runs migrations, and
//! serves the REST API plus the static frontend from one process.

use std::net::SocketAddr;
use std::sync::Arc;

use pawtrack_api::{build_router, AppState};
use pawtrack_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = pawtrack_common::config::init()?;

    // Initialize tracing (structured logging)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pawtrack=debug,tower_http=debug".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("Starting PawTrack v{}", env!("CARGO_PKG_VERSION"));

    // Connect to the database and bring the schema up to date
    let db = Database::connect(config).await?;
    db.migrate().await?;

    let state = Arc::new(AppState { db });
    let router = build_router(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("REST API listening on http://{addr}");
    tracing::info!("Frontend served from {}", config.server.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
