//! # pawtrack-api
//!
//! REST layer for PawTrack: JWT authentication, per-resource routers, and the
//! standard `{success, message, data}` envelope. The router also serves the
//! static single-page frontend.

pub mod auth;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use pawtrack_db::Database;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

/// Shared application state.
pub struct AppState {
    pub db: Database,
}

/// Assemble the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .nest("/auth", routes::auth::router())
        .nest("/pets", routes::pets::router())
        .nest("/health", routes::health::router())
        .nest("/subscriptions", routes::subscriptions::router())
        .nest("/appointments", routes::appointments::router())
        .nest("/notifications", routes::notifications::router());

    let static_dir = pawtrack_common::config::get().server.static_dir.clone();

    Router::new()
        .nest("/api", api)
        .merge(routes::system::router())
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .with_state(state)
}
